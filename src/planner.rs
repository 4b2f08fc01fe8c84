//! Task creation and ranking.
//!
//! Ordering combines the priority weight with a deadline-urgency bonus;
//! next-task suggestion deliberately looks at priority alone. The two scores
//! disagree on purpose and must stay that way until product clarifies the
//! intent (see DESIGN.md).

use chrono::{NaiveDate, Utc};

use crate::fields::Priority;
use crate::task::Task;

/// Keyword tiers applied to a task name at creation time. This vocabulary is
/// distinct from the sentence-level cues in `nlp`: the stored priority always
/// comes from the name alone.
pub fn analyze_priority(name: &str) -> Priority {
    let name = name.to_lowercase();
    let high = ["urgent", "immediat", "critique", "bug", "bloquant"];
    let medium = ["amélior", "refactor", "optim", "perf"];
    let low = ["test", "doc", "documentation", "readme"];
    if high.iter().any(|k| name.contains(k)) {
        Priority::Haute
    } else if medium.iter().any(|k| name.contains(k)) {
        Priority::Moyenne
    } else if low.iter().any(|k| name.contains(k)) {
        Priority::Basse
    } else {
        Priority::Moyenne
    }
}

/// Build a task with its intrinsic priority derived from the name.
pub fn create_task(
    id: u64,
    name: &str,
    deadline: Option<String>,
    estimate: Option<String>,
) -> Task {
    Task {
        id,
        name: name.to_string(),
        priority: analyze_priority(name),
        done: false,
        created_at_utc: Utc::now().timestamp(),
        deadline,
        estimate,
    }
}

/// Urgency bonus: `max(0, 10 - days_until_deadline)` when the deadline is a
/// valid ISO date. Overdue tasks keep climbing linearly; anything that fails
/// to parse contributes nothing.
fn deadline_bonus(deadline: Option<&str>, today: NaiveDate) -> i64 {
    let Some(raw) = deadline else { return 0 };
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => (10 - (d - today).num_days()).max(0),
        Err(_) => 0,
    }
}

/// Ranking score: priority weight plus urgency bonus.
pub fn score(task: &Task, today: NaiveDate) -> i64 {
    task.priority.weight() + deadline_bonus(task.deadline.as_deref(), today)
}

/// Order tasks descending by score. The sort is stable, so equal scores
/// retain input order.
pub fn sort_tasks<'a>(tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
    let mut ranked: Vec<&Task> = tasks.iter().collect();
    ranked.sort_by(|a, b| score(b, today).cmp(&score(a, today)));
    ranked
}

/// Outcome of a next-task suggestion.
#[derive(Debug, PartialEq)]
pub enum Suggestion<'a> {
    Task(&'a Task),
    /// Nothing pending: every task is done (or the list is empty).
    AllDone,
}

/// Pick the pending task with the highest priority weight. Deadlines are
/// intentionally not considered here, unlike [`sort_tasks`]. The first of
/// equally-weighted tasks wins.
pub fn suggest_next(tasks: &[Task]) -> Suggestion<'_> {
    let mut best: Option<&Task> = None;
    for task in tasks.iter().filter(|t| !t.done) {
        match best {
            Some(b) if task.priority.weight() <= b.priority.weight() => {}
            _ => best = Some(task),
        }
    }
    match best {
        Some(t) => Suggestion::Task(t),
        None => Suggestion::AllDone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, priority: Priority, deadline: Option<&str>, done: bool) -> Task {
        Task {
            id: 0,
            name: name.to_string(),
            priority,
            done,
            created_at_utc: 0,
            deadline: deadline.map(|s| s.to_string()),
            estimate: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    #[test]
    fn name_priority_tiers() {
        assert_eq!(analyze_priority("corriger bug login"), Priority::Haute);
        assert_eq!(analyze_priority("améliorer les perfs"), Priority::Moyenne);
        assert_eq!(analyze_priority("tests unitaires"), Priority::Basse);
        assert_eq!(analyze_priority("écrire la documentation"), Priority::Basse);
        assert_eq!(analyze_priority("préparer la démo"), Priority::Moyenne);
    }

    #[test]
    fn sort_is_descending_by_priority() {
        let tasks = vec![
            task("A", Priority::Basse, None, false),
            task("B", Priority::Haute, None, false),
        ];
        let ranked = sort_tasks(&tasks, today());
        assert_eq!(ranked[0].name, "B");
        assert_eq!(ranked[1].name, "A");
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let tasks = vec![
            task("first", Priority::Moyenne, None, false),
            task("second", Priority::Moyenne, None, false),
        ];
        let ranked = sort_tasks(&tasks, today());
        assert_eq!(ranked[0].name, "first");
        assert_eq!(ranked[1].name, "second");
    }

    #[test]
    fn near_deadline_outranks_far_deadline() {
        let tasks = vec![
            task("far", Priority::Haute, Some("2025-10-31"), false),
            task("near", Priority::Haute, Some("2025-10-01"), false),
        ];
        let ranked = sort_tasks(&tasks, today());
        assert_eq!(ranked[0].name, "near");
    }

    #[test]
    fn urgency_bonus_can_beat_a_higher_priority() {
        // moyenne due today scores 2 + 10 = 12, haute without deadline only 3.
        let tasks = vec![
            task("calm", Priority::Haute, None, false),
            task("due", Priority::Moyenne, Some("2025-10-01"), false),
        ];
        let ranked = sort_tasks(&tasks, today());
        assert_eq!(ranked[0].name, "due");
    }

    #[test]
    fn overdue_bonus_keeps_growing() {
        let t = task("late", Priority::Basse, Some("2025-09-26"), false);
        assert_eq!(score(&t, today()), 1 + 15);
    }

    #[test]
    fn unparseable_deadline_contributes_nothing() {
        let t = task("vague", Priority::Haute, Some("15 janvier 2026"), false);
        assert_eq!(score(&t, today()), 3);
    }

    #[test]
    fn suggestion_ignores_deadlines() {
        let tasks = vec![
            task("due today", Priority::Moyenne, Some("2025-10-01"), false),
            task("important", Priority::Haute, None, false),
        ];
        match suggest_next(&tasks) {
            Suggestion::Task(t) => assert_eq!(t.name, "important"),
            Suggestion::AllDone => panic!("expected a suggestion"),
        }
    }

    #[test]
    fn suggestion_skips_done_tasks() {
        let tasks = vec![
            task("finished", Priority::Haute, None, true),
            task("open", Priority::Basse, None, false),
        ];
        match suggest_next(&tasks) {
            Suggestion::Task(t) => assert_eq!(t.name, "open"),
            Suggestion::AllDone => panic!("expected a suggestion"),
        }
    }

    #[test]
    fn all_done_returns_sentinel() {
        let tasks = vec![task("finished", Priority::Haute, None, true)];
        assert_eq!(suggest_next(&tasks), Suggestion::AllDone);
        assert_eq!(suggest_next(&[]), Suggestion::AllDone);
    }

    #[test]
    fn first_of_equal_weights_wins() {
        let tasks = vec![
            task("first", Priority::Haute, None, false),
            task("second", Priority::Haute, None, false),
        ];
        match suggest_next(&tasks) {
            Suggestion::Task(t) => assert_eq!(t.name, "first"),
            Suggestion::AllDone => panic!("expected a suggestion"),
        }
    }
}
