use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use serde_json::{Value, json};

use crate::io::store::MemoryStore;
use crate::model::config::AppConfig;
use crate::model::user::Session;
use crate::tui::app::App;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 32;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the default test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// A small board: three tasks, two contacts, one user
pub fn sample_root() -> Value {
    json!({
        "tasks": {
            "lastTaskId": 3,
            "1": {
                "id": 1, "title": "Login page", "status": "to_do",
                "description": "Build the login form", "category": "User Story",
                "priority": "urgent", "duedate": "2025-03-01",
                "assigned": ["Anna Meier"], "subtasks": ["Sketch"], "subtasksDone": ["Specs"]
            },
            "2": {
                "id": 2, "title": "Header", "status": "to_do",
                "category": "Technical Task", "priority": "low", "duedate": "2025-04-01"
            },
            "3": {
                "id": 3, "title": "Footer", "status": "in_progress",
                "category": "Technical Task", "priority": "medium", "duedate": "2025-05-01"
            }
        },
        "contacts": {
            "lastContactId": 2,
            "1": {"name": "Zoe Adams", "email": "zoe@x.io", "phonenumber": "0151 1"},
            "2": {"name": "Anna Meier", "email": "anna@x.io", "phonenumber": "0151 2"}
        },
        "users": [{"name": "Ann Lee", "mail": "ann@x.io", "password": "secret"}]
    })
}

/// An App on a memory store, still at the login screen
pub fn app_with_store(root: Value) -> App {
    App::new(
        Box::new(MemoryStore::with_root(root)),
        &AppConfig::default(),
    )
}

/// An App logged in as guest, showing the summary
pub fn signed_in_app(root: Value) -> App {
    let mut app = app_with_store(root);
    app.start_session(Session::guest());
    app
}
