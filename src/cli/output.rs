use serde::Serialize;

use crate::model::task::{Priority, TaskStatus};
use crate::ops::search::SearchHit;
use crate::view::board::{BoardView, CardView};
use crate::view::contacts::{ContactGroup, ContactRow};
use crate::view::detail::TaskDetailView;
use crate::view::summary::SummaryView;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CardJson {
    pub key: String,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub excerpt: String,
    pub assigned: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks_done: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks_total: Option<usize>,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub status: TaskStatus,
    pub label: &'static str,
    pub tasks: Vec<CardJson>,
}

#[derive(Serialize)]
pub struct TaskDetailJson {
    pub key: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub duedate: String,
    pub assigned: Vec<String>,
    pub subtasks: Vec<String>,
    pub subtasks_done: Vec<String>,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub key: String,
    pub status: TaskStatus,
    pub field: &'static str,
    pub text: String,
}

#[derive(Serialize)]
pub struct ContactJson {
    pub key: String,
    pub name: String,
    pub email: String,
    pub phonenumber: String,
    pub initials: String,
}

#[derive(Serialize)]
pub struct ContactGroupJson {
    pub letter: char,
    pub contacts: Vec<ContactJson>,
}

#[derive(Serialize)]
pub struct SummaryJson {
    pub greeting: String,
    pub to_do: usize,
    pub in_progress: usize,
    pub await_feedback: usize,
    pub done: usize,
    pub total: usize,
    pub urgent: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_urgent_due: Option<String>,
}

#[derive(Serialize)]
pub struct SessionJson {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn card_to_json(card: &CardView) -> CardJson {
    CardJson {
        key: card.key.clone(),
        title: card.title.clone(),
        category: card.category.clone(),
        priority: card.priority,
        excerpt: card.excerpt.clone(),
        assigned: card.badges.iter().map(|b| b.name.clone()).collect(),
        subtasks_done: card.progress.map(|(done, _)| done),
        subtasks_total: card.progress.map(|(_, total)| total),
    }
}

pub fn board_to_json(view: &BoardView) -> Vec<ColumnJson> {
    view.columns
        .iter()
        .map(|col| ColumnJson {
            status: col.status,
            label: col.label(),
            tasks: col.cards.iter().map(card_to_json).collect(),
        })
        .collect()
}

pub fn detail_to_json(view: &TaskDetailView) -> TaskDetailJson {
    TaskDetailJson {
        key: view.key.clone(),
        title: view.title.clone(),
        description: view.description.clone(),
        category: view.category.clone(),
        priority: view.priority,
        status: view.status,
        duedate: view.duedate.clone(),
        assigned: view.assignees.iter().map(|a| a.badge.name.clone()).collect(),
        subtasks: view
            .subtasks
            .iter()
            .filter(|s| !s.done)
            .map(|s| s.text.clone())
            .collect(),
        subtasks_done: view
            .subtasks
            .iter()
            .filter(|s| s.done)
            .map(|s| s.text.clone())
            .collect(),
    }
}

pub fn hit_to_json(hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        key: hit.task_key.clone(),
        status: hit.status,
        field: hit.field.as_str(),
        text: hit.text.clone(),
    }
}

pub fn contact_to_json(row: &ContactRow) -> ContactJson {
    ContactJson {
        key: row.key.clone(),
        name: row.name.clone(),
        email: row.email.clone(),
        phonenumber: row.phone.clone(),
        initials: row.initials.clone(),
    }
}

pub fn contacts_to_json(groups: &[ContactGroup]) -> Vec<ContactGroupJson> {
    groups
        .iter()
        .map(|g| ContactGroupJson {
            letter: g.letter,
            contacts: g.contacts.iter().map(contact_to_json).collect(),
        })
        .collect()
}

pub fn summary_to_json(view: &SummaryView) -> SummaryJson {
    SummaryJson {
        greeting: view.greeting_line(),
        to_do: view.count(TaskStatus::ToDo),
        in_progress: view.count(TaskStatus::InProgress),
        await_feedback: view.count(TaskStatus::AwaitFeedback),
        done: view.count(TaskStatus::Done),
        total: view.total,
        urgent: view.urgent,
        next_urgent_due: view.next_urgent_due.map(|d| d.format("%Y-%m-%d").to_string()),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One card as a single line: key, priority marker, title, progress, assignees
pub fn format_card_line(card: &CardView) -> String {
    let mut line = format!("{:>4}  {} {}", card.key, card.priority.symbol(), card.title);
    if !card.category.is_empty() {
        line.push_str(&format!("  [{}]", card.category));
    }
    if let Some((done, total)) = card.progress {
        line.push_str(&format!("  {}/{} subtasks", done, total));
    }
    if !card.badges.is_empty() {
        let initials: Vec<&str> = card.badges.iter().map(|b| b.initials.as_str()).collect();
        line.push_str(&format!("  ({})", initials.join(" ")));
    }
    line
}

/// The board, one section per column
pub fn format_board(view: &BoardView) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, col) in view.columns.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{} ({})", col.label(), col.cards.len()));
        if col.cards.is_empty() {
            lines.push(format!("      {}", col.empty_text()));
        }
        for card in &col.cards {
            lines.push(format_card_line(card));
        }
    }
    lines
}

/// Detailed task view
pub fn format_task_detail(view: &TaskDetailView) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{}  {}", view.key, view.title));
    if !view.category.is_empty() {
        lines.push(format!("  category: {}", view.category));
    }
    lines.push(format!("  status:   {}", view.status.label()));
    lines.push(format!(
        "  priority: {} {}",
        view.priority.as_str(),
        view.priority.symbol()
    ));
    lines.push(format!("  due:      {}", view.due_label()));
    if !view.assignees.is_empty() {
        let names: Vec<&str> = view.assignees.iter().map(|a| a.badge.name.as_str()).collect();
        lines.push(format!("  assigned: {}", names.join(", ")));
    }
    if !view.description.trim().is_empty() {
        lines.push(String::new());
        for l in view.description.lines() {
            lines.push(format!("  {}", l));
        }
    }
    if !view.subtasks.is_empty() {
        lines.push(String::new());
        lines.push("  subtasks:".to_string());
        for s in &view.subtasks {
            let mark = if s.done { 'x' } else { ' ' };
            lines.push(format!("    [{}] {}", mark, s.text));
        }
    }
    lines
}

pub fn format_contacts(groups: &[ContactGroup]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(group.letter.to_string());
        for row in &group.contacts {
            lines.push(format!(
                "{:>4}  {:<2}  {}  <{}>  {}",
                row.key, row.initials, row.name, row.email, row.phone
            ));
        }
    }
    lines
}

pub fn format_summary(view: &SummaryView) -> Vec<String> {
    let mut lines = vec![view.greeting_line(), String::new()];
    for status in TaskStatus::ALL {
        lines.push(format!("{:<16}{}", status.label(), view.count(status)));
    }
    lines.push(format!("{:<16}{}", "Tasks in board", view.total));
    let next = view
        .next_urgent_due
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "no deadline".to_string());
    lines.push(format!("{:<16}{} (next: {})", "Urgent", view.urgent, next));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::board_io::load_board;
    use crate::io::store::MemoryStore;
    use crate::ops::search::Filter;
    use crate::view::board::board_view;
    use crate::view::contacts::contact_list;
    use crate::view::detail::task_detail;
    use crate::view::summary::summary;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_board() -> crate::model::board::Board {
        let store = MemoryStore::with_root(json!({
            "tasks": {
                "1": {
                    "id": 1, "title": "Login page", "description": "Build the login form",
                    "duedate": "2025-03-01", "category": "User Story", "priority": "Urgent",
                    "status": "to_do", "assigned": ["Anna Meier"],
                    "subtasks": ["Sketch"], "subtasksDone": ["Specs"]
                },
                "2": { "id": 2, "title": "Footer", "status": "done", "priority": "Low" }
            },
            "contacts": {
                "1": { "name": "Zoe Adams", "email": "zoe@x.io", "phonenumber": "1" },
                "2": { "name": "Anna Meier", "email": "anna@x.io", "phonenumber": "2" }
            }
        }));
        load_board(&store).unwrap()
    }

    #[test]
    fn board_lists_every_column_with_counts() {
        let board = sample_board();
        let lines = format_board(&board_view(&board, &Filter::default()));
        assert_eq!(lines[0], "To do (1)");
        assert!(lines[1].contains("Login page"));
        assert!(lines[1].contains("1/2 subtasks"));
        assert!(lines[1].contains("(AM)"));
        assert!(lines.iter().any(|l| l.contains("No tasks In progress")));
        assert!(lines.iter().any(|l| l == "Done (1)"));
    }

    #[test]
    fn detail_lists_subtasks_with_marks() {
        let board = sample_board();
        let lines = format_task_detail(&task_detail(&board, "1").unwrap());
        assert!(lines.contains(&"  due:      01/03/2025".to_string()));
        assert!(lines.contains(&"    [ ] Sketch".to_string()));
        assert!(lines.contains(&"    [x] Specs".to_string()));
    }

    #[test]
    fn detail_json_splits_subtask_lists() {
        let board = sample_board();
        let j = serde_json::to_value(detail_to_json(&task_detail(&board, "1").unwrap())).unwrap();
        assert_eq!(j["status"], "to_do");
        assert_eq!(j["subtasks"], json!(["Sketch"]));
        assert_eq!(j["subtasks_done"], json!(["Specs"]));
    }

    #[test]
    fn contacts_sorted_by_first_name() {
        let board = sample_board();
        let lines = format_contacts(&contact_list(&board));
        assert_eq!(lines[0], "A");
        assert!(lines[1].contains("Anna Meier"));
        assert_eq!(lines[2], "Z");
    }

    #[test]
    fn summary_names_next_urgent_deadline() {
        let board = sample_board();
        let now = NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let view = summary(&board, Some("Ann Lee"), now);
        let lines = format_summary(&view);
        assert_eq!(lines[0], "Good morning, Ann Lee");
        assert!(lines.iter().any(|l| l.contains("March 1, 2025")));

        let j = serde_json::to_value(summary_to_json(&view)).unwrap();
        assert_eq!(j["urgent"], 1);
        assert_eq!(j["total"], 2);
        assert_eq!(j["next_urgent_due"], "2025-03-01");
    }
}
