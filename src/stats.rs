//! Summary counts over a task collection.
//!
//! Pure single-pass aggregation. "Today" is an explicit parameter so the
//! caller's clock (device local time) stays out of this module.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Status, Task};

/// Aggregate counts derived from a task collection.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub completed_today: usize,
}

/// Compute summary counts for `tasks` as seen on `today`.
///
/// A pending task is overdue when its due date is strictly before `today`;
/// due today is not overdue. A completed task counts toward
/// `completed_today` when its completion date equals `today`.
pub fn compute_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            Status::Completed => {
                stats.completed += 1;
                if task.completed_at == Some(today) {
                    stats.completed_today += 1;
                }
            }
            Status::Pending => {
                stats.pending += 1;
                if task.due_date.map(|due| due < today).unwrap_or(false) {
                    stats.overdue += 1;
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("date literal")
    }

    fn task(
        id: &str,
        status: Status,
        due_date: Option<NaiveDate>,
        completed_at: Option<NaiveDate>,
    ) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: None,
            priority: Priority::Medium,
            status,
            due_date,
            created_at: Utc::now(),
            completed_at,
        }
    }

    #[test]
    fn empty_collection_is_all_zero() {
        let stats = compute_stats(&[], date("2026-08-31"));
        assert_eq!(stats, TaskStats::default());
    }

    #[test]
    fn total_is_completed_plus_pending() {
        let today = date("2026-08-31");
        let tasks = vec![
            task("1", Status::Pending, None, None),
            task("2", Status::Completed, None, Some(today)),
            task("3", Status::Pending, Some(date("2026-09-01")), None),
            task("4", Status::Completed, None, Some(date("2026-08-01"))),
        ];
        let stats = compute_stats(&tasks, today);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.total, stats.completed + stats.pending);
    }

    #[test]
    fn overdue_requires_due_strictly_before_today() {
        let today = date("2026-08-31");
        let tasks = vec![
            task("1", Status::Pending, Some(date("2026-08-30")), None),
            task("2", Status::Pending, Some(today), None),
            task("3", Status::Pending, None, None),
        ];
        let stats = compute_stats(&tasks, today);
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn overdue_ignores_completed_tasks() {
        let today = date("2026-08-31");
        let tasks = vec![task(
            "1",
            Status::Completed,
            Some(date("2026-01-01")),
            Some(date("2026-08-15")),
        )];
        let stats = compute_stats(&tasks, today);
        assert_eq!(stats.overdue, 0);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn completed_today_matches_calendar_date() {
        let today = date("2026-08-31");
        let tasks = vec![
            task("1", Status::Completed, None, Some(today)),
            task("2", Status::Completed, None, Some(date("2026-08-30"))),
            task("3", Status::Completed, None, None),
        ];
        let stats = compute_stats(&tasks, today);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.completed_today, 1);
    }
}
