//! GrantScope - grant portfolio CSV dashboard core
//!
//! Parses the portfolio export, normalizes its fields and builds the
//! filtered, aggregated and sorted views drawn by the desktop front-end.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod normalize;
pub mod stats;

pub use config::AppConfig;
pub use dashboard::{Dashboard, DashboardView, ViewState};
pub use data::{DataLoader, LoaderError, Record};
