//! Field normalizers - pure conversions from raw cells to typed values

mod agent;
mod amount;
mod date;

pub use agent::{AgentMatcher, Role, TARGET_AGENT};
pub use amount::{format_amount, format_amount_compact, parse_amount, parse_leading_float};
pub use date::parse_date;
