//! Shared enumerations for command interpretation and task management.
//!
//! This module defines the action tags produced by the interpreter and the
//! three-level priority scale used both on commands and on stored tasks.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The classified intent of one natural-language sentence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AddProject,
    AddTask,
    CompleteTask,
    DeleteTask,
    DeleteProject,
    ShowProject,
    Unknown,
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Haute,
    Moyenne,
    Basse,
}

impl Priority {
    /// Numeric rank used by the ranking engine: haute=3, moyenne=2, basse=1.
    pub fn weight(self) -> i64 {
        match self {
            Priority::Haute => 3,
            Priority::Moyenne => 2,
            Priority::Basse => 1,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Moyenne
    }
}

/// Format an action tag the way it serializes (`add_task`, `unknown`, ...).
pub fn format_action(a: Action) -> &'static str {
    match a {
        Action::AddProject => "add_project",
        Action::AddTask => "add_task",
        Action::CompleteTask => "complete_task",
        Action::DeleteTask => "delete_task",
        Action::DeleteProject => "delete_project",
        Action::ShowProject => "show_project",
        Action::Unknown => "unknown",
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Haute => "haute",
        Priority::Moyenne => "moyenne",
        Priority::Basse => "basse",
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(format_action(*self))
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(format_priority(*self))
    }
}
