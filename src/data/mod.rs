//! Data module - CSV loading, record building, filtering and sorting

mod loader;
mod parser;
mod processor;
mod records;
mod sort;

pub use loader::{parse_records, DataLoader, LoaderError};
pub use parser::{parse, parse_auto, Row, COMMA, SEMICOLON};
pub use processor::{DataProcessor, RoleFilter, StatusFilter, ALL};
pub use records::{build_records, Record};
pub use sort::{sort_rows, ColumnSpec, ColumnType, SortDirection, SortState};

/// Column names used by the grant portfolio export.
pub mod columns {
    pub const GRANT_AGENT: &str = "Grant agent";
    pub const GRANT_STATUS: &str = "Grant status";
    pub const GRANT_AMOUNT: &str = "Grant amount";
    pub const GRANT_TYPE: &str = "Grant type";
    pub const GRANT_ID: &str = "GPE Grant ID";
    pub const COUNTRY_NAME: &str = "Country name";
    pub const REGION: &str = "Region";
    pub const APPROVAL_DATE: &str = "Actual approval date";
    pub const START_DATE: &str = "Start date";
}
