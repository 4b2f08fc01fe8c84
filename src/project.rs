//! Project container.
//!
//! Tasks live in an arena keyed by id, with a separate insertion-order index.
//! Lookups and deletions go through the id, never through in-place list
//! scanning, and display order survives deletions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// A named set of tasks with a free-text description. The surrounding
/// `Database` keys projects case-insensitively by display name.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Project {
    pub description: String,
    tasks: BTreeMap<u64, Task>,
    order: Vec<u64>,
}

impl Project {
    pub fn new(description: &str) -> Self {
        Project {
            description: description.to_string(),
            tasks: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Next free task id.
    pub fn next_id(&self) -> u64 {
        self.tasks.keys().next_back().copied().unwrap_or(0) + 1
    }

    pub fn insert(&mut self, task: Task) {
        self.order.push(task.id);
        self.tasks.insert(task.id, task);
    }

    /// Tasks in insertion order.
    pub fn tasks_in_order(&self) -> Vec<Task> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id).cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Case-insensitive task-name lookup, first match in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<&Task> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .find(|t| t.name_matches(name))
    }

    /// Mark the named task done. Returns false if no task matches.
    pub fn mark_done(&mut self, name: &str) -> bool {
        let Some(id) = self.find_by_name(name).map(|t| t.id) else {
            return false;
        };
        if let Some(task) = self.tasks.get_mut(&id) {
            task.done = true;
            return true;
        }
        false
    }

    /// Remove the named task from the arena and the order index.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        let Some(id) = self.find_by_name(name).map(|t| t.id) else {
            return false;
        };
        self.tasks.remove(&id);
        self.order.retain(|&o| o != id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::create_task;

    fn project_with(names: &[&str]) -> Project {
        let mut p = Project::new("test");
        for name in names {
            let id = p.next_id();
            p.insert(create_task(id, name, None, None));
        }
        p
    }

    #[test]
    fn ids_are_never_reused_upwards() {
        let mut p = project_with(&["a", "b"]);
        assert_eq!(p.next_id(), 3);
        p.remove_by_name("a");
        assert_eq!(p.next_id(), 3);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let mut p = project_with(&["Corriger les bugs"]);
        assert!(p.find_by_name("corriger les BUGS").is_some());
        assert!(p.mark_done("CORRIGER les bugs"));
        assert!(p.find_by_name("corriger les bugs").map(|t| t.done).unwrap_or(false));
    }

    #[test]
    fn removal_keeps_order_of_the_rest() {
        let mut p = project_with(&["a", "b", "c"]);
        assert!(p.remove_by_name("b"));
        let names: Vec<String> = p.tasks_in_order().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(!p.remove_by_name("b"));
    }
}
