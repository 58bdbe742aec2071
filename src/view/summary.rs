use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::model::board::Board;
use crate::model::task::{Priority, TaskStatus};

/// Figures shown on the summary page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub greeting: &'static str,
    /// `None` for guests
    pub user_name: Option<String>,
    /// Task count per status, in column order
    pub counts: [usize; 4],
    pub total: usize,
    pub urgent: usize,
    /// Earliest due date among urgent tasks
    pub next_urgent_due: Option<NaiveDate>,
}

impl SummaryView {
    pub fn count(&self, status: TaskStatus) -> usize {
        self.counts[status.index()]
    }

    /// "Good morning, Anna" or just "Good morning"
    pub fn greeting_line(&self) -> String {
        match &self.user_name {
            Some(name) => format!("{}, {}", self.greeting, name),
            None => self.greeting.to_string(),
        }
    }
}

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

pub fn summary(board: &Board, user_name: Option<&str>, now: NaiveDateTime) -> SummaryView {
    let mut counts = [0usize; 4];
    for task in board.tasks.values() {
        counts[task.status.index()] += 1;
    }
    let urgent: Vec<_> = board
        .tasks
        .values()
        .filter(|t| t.priority == Priority::Urgent)
        .collect();
    SummaryView {
        greeting: greeting(now.hour()),
        user_name: user_name.map(str::to_string),
        counts,
        total: board.tasks.len(),
        urgent: urgent.len(),
        next_urgent_due: urgent.iter().filter_map(|t| t.due_date()).min(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn greeting_by_hour() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
    }

    #[test]
    fn counts_and_earliest_urgent_due() {
        let mut board = Board::new();
        let mut a = Task::new("a", TaskStatus::ToDo);
        a.priority = Priority::Urgent;
        a.duedate = "2025-05-01".into();
        let mut b = Task::new("b", TaskStatus::Done);
        b.priority = Priority::Urgent;
        b.duedate = "2025-03-01".into();
        let mut c = Task::new("c", TaskStatus::ToDo);
        c.duedate = "2024-01-01".into();
        board.insert_task("1", a);
        board.insert_task("2", b);
        board.insert_task("3", c);

        let view = summary(&board, Some("Anna"), at(19));
        assert_eq!(view.count(TaskStatus::ToDo), 2);
        assert_eq!(view.count(TaskStatus::InProgress), 0);
        assert_eq!(view.total, 3);
        assert_eq!(view.urgent, 2);
        assert_eq!(view.next_urgent_due, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(view.greeting_line(), "Good evening, Anna");
    }

    #[test]
    fn guest_greeting_has_no_name() {
        let view = summary(&Board::new(), None, at(9));
        assert_eq!(view.greeting_line(), "Good morning");
        assert_eq!(view.next_urgent_due, None);
    }
}
