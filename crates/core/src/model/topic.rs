use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping key used to filter which questions enter a session pool.
///
/// Source records may carry either an integer or a string key under
/// `tema`; records without one fall back to the sentinel
/// `Topic::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Topic {
    Number(i64),
    Name(String),
}

impl Default for Topic {
    fn default() -> Self {
        Topic::Number(0)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Number(n) => write!(f, "{n}"),
            Topic::Name(name) => write!(f, "{name}"),
        }
    }
}
