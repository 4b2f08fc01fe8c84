//! Task data structure.
//!
//! A `Task` is a single work item inside a project. Its priority is fixed at
//! creation time from the task name alone (see `planner::analyze_priority`)
//! and never re-evaluated afterwards.

use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// A work item with deadline and effort metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub priority: Priority,
    pub done: bool,
    pub created_at_utc: i64,
    /// ISO `YYYY-MM-DD`, or a verbatim date phrase when the input could not
    /// be canonicalized. Consumers must tolerate both forms.
    pub deadline: Option<String>,
    /// Free-text effort token ("2h", "5pts"), never numerically normalized.
    pub estimate: Option<String>,
}

impl Task {
    /// Case-insensitive name match, the identity used for completion and
    /// deletion lookups.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
