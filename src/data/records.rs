//! Record Builder Module
//! Turns parsed rows into keyed grant records.

use super::parser::Row;
use serde::Serialize;
use std::collections::BTreeMap;

/// Marker found in the first cell of an exported metadata preamble line.
const PREAMBLE_MARKER: &str = "selected filters";

/// A single grant row keyed by trimmed header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Value for `key`, if the column exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value for `key`, or `""` when the column is missing.
    pub fn field(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// True when every value is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::default();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Build records from parsed rows.
///
/// A leading "selected filters" line is skipped, the next row is the header,
/// and every following row becomes a record. Cells missing from a short row
/// map to `""`; records with only blank values are dropped.
pub fn build_records(rows: &[Row]) -> Vec<Record> {
    let mut working = rows;
    let Some(first) = working.first() else {
        return Vec::new();
    };

    let first_cell = first.first().map(|c| c.to_lowercase()).unwrap_or_default();
    if first_cell.contains(PREAMBLE_MARKER) {
        working = &working[1..];
    }

    let Some((header, data_rows)) = working.split_first() else {
        return Vec::new();
    };
    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    data_rows
        .iter()
        .map(|row| {
            header
                .iter()
                .enumerate()
                .map(|(idx, h)| {
                    let value = row.get(idx).map(|c| c.trim()).unwrap_or("");
                    (h.clone(), value.to_string())
                })
                .collect::<Record>()
        })
        .filter(|record| !record.is_blank())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::{parse, parse_auto};

    #[test]
    fn test_header_is_trimmed_and_values_mapped() {
        let rows = parse(" Country name , Region\n Kenya ,Africa\n", ',');
        let records = build_records(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Country name"), Some("Kenya"));
        assert_eq!(records[0].get("Region"), Some("Africa"));
    }

    #[test]
    fn test_preamble_line_is_skipped() {
        let text = "Selected Filters: Status=All\nCountry name,Region,Grant status\nChad,Africa,Active\n";
        let records = build_records(&parse_auto(text));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("Grant status"), "Active");
    }

    #[test]
    fn test_short_rows_fill_with_empty_strings() {
        let rows = parse("a,b,c\n1\n", ',');
        let records = build_records(&rows);
        assert_eq!(records[0].get("b"), Some(""));
        assert_eq!(records[0].get("c"), Some(""));
    }

    #[test]
    fn test_blank_valued_records_are_dropped() {
        let rows: Vec<Row> = vec![
            vec!["a".into(), "b".into()],
            vec!["  ".into(), "".into()],
            vec!["".into(), "".into(), "extra".into()],
            vec!["x".into(), "".into()],
        ];
        let records = build_records(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("a"), "x");
        assert!(records.iter().all(|r| !r.is_blank()));
    }

    #[test]
    fn test_order_is_preserved() {
        let rows = parse("id\n3\n1\n2\n", ',');
        let records = build_records(&rows);
        let ids: Vec<&str> = records.iter().map(|r| r.field("id")).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_empty_and_header_only_inputs() {
        assert!(build_records(&[]).is_empty());
        assert!(build_records(&parse("a,b\n", ',')).is_empty());
        assert!(build_records(&parse("selected filters\n", ',')).is_empty());
    }
}
