//! CSV Data Loader Module
//! Fetches the grant export from disk or HTTP and builds records from it.

use super::parser::parse_auto;
use super::records::{build_records, Record};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch CSV: {0}")]
    Http(#[from] reqwest::Error),
}

/// Parse raw export text into records, picking the delimiter automatically.
pub fn parse_records(text: &str) -> Vec<Record> {
    build_records(&parse_auto(text))
}

/// Holds the full record set for one source.
#[derive(Debug, Default)]
pub struct DataLoader {
    records: Vec<Record>,
    source: Option<String>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `source` (a path or an `http(s)://` URL) as text.
    ///
    /// This is the only fallible step of the pipeline.
    pub fn fetch_text(source: &str) -> Result<String, LoaderError> {
        let result = if is_url(source) {
            reqwest::blocking::get(source)
                .and_then(|resp| resp.error_for_status())
                .and_then(|resp| resp.text())
                .map_err(LoaderError::from)
        } else {
            std::fs::read_to_string(source).map_err(|e| LoaderError::Io {
                path: PathBuf::from(source),
                source: e,
            })
        };
        if let Err(e) = &result {
            warn!(source, error = %e, "could not load CSV");
        }
        result
    }

    /// Fetch, parse and keep the records from `source`.
    ///
    /// On failure the previously loaded records are left untouched.
    pub fn load(&mut self, source: &str) -> Result<&[Record], LoaderError> {
        let text = Self::fetch_text(source)?;
        let records = parse_records(&text);
        info!(source, rows = records.len(), "loaded CSV");
        self.source = Some(source.to_string());
        self.records = records;
        Ok(&self.records)
    }

    /// Hand the record set over to its owner.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

fn is_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
