//! Configuration file handling.
//!
//! Settings come from an optional `grantscope.toml` next to the binary's
//! working directory. Every field has a default, so an absent file is fine.

use crate::dashboard::ViewState;
use crate::data::{RoleFilter, StatusFilter};
use crate::normalize::{AgentMatcher, TARGET_AGENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "grantscope.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config {path}: target_agent must not be empty")]
    EmptyTargetAgent { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// CSV path or `http(s)://` URL loaded at startup.
    #[serde(default = "default_source")]
    pub source: String,

    /// Organization acronym whose grants are shown.
    #[serde(default = "default_target_agent")]
    pub target_agent: String,

    #[serde(default)]
    pub initial_status: StatusFilter,

    #[serde(default)]
    pub initial_role: RoleFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            target_agent: default_target_agent(),
            initial_status: StatusFilter::All,
            initial_role: RoleFilter::All,
        }
    }
}

fn default_source() -> String {
    "portfolio-data-2003-2026Q1.csv".to_string()
}

fn default_target_agent() -> String {
    TARGET_AGENT.to_string()
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.target_agent.trim().is_empty() {
            return Err(ConfigError::EmptyTargetAgent {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    pub fn matcher(&self) -> AgentMatcher {
        AgentMatcher::new(&self.target_agent)
    }

    pub fn initial_view(&self) -> ViewState {
        ViewState {
            status: self.initial_status.clone(),
            role: self.initial_role,
            ..ViewState::default()
        }
    }
}
