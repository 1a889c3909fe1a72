//! Grant agent classification.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization whose grants the dashboard tracks.
pub const TARGET_AGENT: &str = "UNESCO";

static AGENT_SEPARATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:,|;|/|\band\b|&|\+|\|)\s*").expect("agent separator regex is valid")
});

/// How the target organization shares a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Target organization is the only listed agent.
    Solo,
    /// Target organization is co-listed with others.
    Shared,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Solo => "Solo",
            Role::Shared => "Shared",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-word, case-insensitive matcher for one organization acronym.
#[derive(Debug, Clone)]
pub struct AgentMatcher {
    acronym: String,
    pattern: Regex,
}

impl Default for AgentMatcher {
    fn default() -> Self {
        Self::new(TARGET_AGENT)
    }
}

impl AgentMatcher {
    pub fn new(acronym: &str) -> Self {
        let acronym = acronym.trim();
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(acronym)))
            .expect("escaped acronym is a valid regex");
        Self {
            acronym: acronym.to_string(),
            pattern,
        }
    }

    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    /// True when the acronym appears as a whole word in `value`.
    pub fn is_member(&self, value: &str) -> bool {
        !value.is_empty() && self.pattern.is_match(value.trim())
    }

    /// Classify the target's role in a raw agent label.
    ///
    /// Returns `None` when the target is not listed at all.
    pub fn role(&self, value: &str) -> Option<Role> {
        if !self.is_member(value) {
            return None;
        }
        let has_other_agents = AGENT_SEPARATORS
            .split(value)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .any(|token| !self.pattern.is_match(token));
        Some(if has_other_agents {
            Role::Shared
        } else {
            Role::Solo
        })
    }
}
