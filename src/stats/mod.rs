//! Stats module - Group counts and summary totals

mod calculator;

pub use calculator::{locale_cmp, Bucket, StatsCalculator, StatusCounts, UNKNOWN_LABEL};
