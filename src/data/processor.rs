//! Data Processor Module
//! Filter engine: agent membership, then status, then role.

use super::columns;
use super::records::Record;
use crate::normalize::{AgentMatcher, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used by the UI for "no filter".
pub const ALL: &str = "All";

/// Status selection. `Only` compares case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => {
                record.field(columns::GRANT_STATUS).trim().to_lowercase() == status.to_lowercase()
            }
        }
    }
}

impl From<String> for StatusFilter {
    fn from(label: String) -> Self {
        if label == ALL {
            StatusFilter::All
        } else {
            StatusFilter::Only(label)
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(label: &str) -> Self {
        StatusFilter::from(label.to_string())
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL),
            StatusFilter::Only(status) => f.write_str(status),
        }
    }
}

/// Role selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoleFilter {
    #[default]
    All,
    Solo,
    Shared,
}

impl RoleFilter {
    pub fn role(&self) -> Option<Role> {
        match self {
            RoleFilter::All => None,
            RoleFilter::Solo => Some(Role::Solo),
            RoleFilter::Shared => Some(Role::Shared),
        }
    }
}

impl fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role() {
            None => f.write_str(ALL),
            Some(role) => f.write_str(role.as_str()),
        }
    }
}

/// Applies the three grant filters. Every stage returns a fresh vector.
#[derive(Debug, Clone, Default)]
pub struct DataProcessor {
    matcher: AgentMatcher,
}

impl DataProcessor {
    pub fn new(matcher: AgentMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &AgentMatcher {
        &self.matcher
    }

    /// Role of the target agent on `record`, if it is listed at all.
    pub fn role_of(&self, record: &Record) -> Option<Role> {
        self.matcher.role(record.field(columns::GRANT_AGENT))
    }

    /// Keep records whose agent field lists the target agent.
    pub fn filter_agent(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.matcher.is_member(r.field(columns::GRANT_AGENT)))
            .cloned()
            .collect()
    }

    pub fn filter_by_status(&self, records: &[Record], status: &StatusFilter) -> Vec<Record> {
        records
            .iter()
            .filter(|r| status.matches(r))
            .cloned()
            .collect()
    }

    pub fn filter_by_role(&self, records: &[Record], role: RoleFilter) -> Vec<Record> {
        match role.role() {
            None => records.to_vec(),
            Some(wanted) => records
                .iter()
                .filter(|r| self.role_of(r) == Some(wanted))
                .cloned()
                .collect(),
        }
    }

    /// Membership, then status, then role.
    pub fn apply(
        &self,
        records: &[Record],
        status: &StatusFilter,
        role: RoleFilter,
    ) -> Vec<Record> {
        let members = self.filter_agent(records);
        let by_status = self.filter_by_status(&members, status);
        self.filter_by_role(&by_status, role)
    }
}
