use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::drag::{BoardLayout, DragEngine};
use crate::form::{ContactForm, LoginForm, SignupForm, TaskForm};
use crate::io::board_io::load_board;
use crate::io::session::{clear_session, read_session, write_session};
use crate::io::store::DocumentStore;
use crate::model::board::Board;
use crate::model::config::AppConfig;
use crate::model::task::TaskStatus;
use crate::model::user::{Session, User};
use crate::ops::search::{Filter, visible_keys};
use crate::ops::task_ops::{self, TaskError};
use crate::view::contacts::{contact_list, flat_keys};

use super::input;
use super::render;
use super::theme::Theme;

/// How long a moved card stays highlighted
pub const FLASH_DURATION: Duration = Duration::from_millis(600);

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Signup,
    Summary,
    Board,
    AddTask,
    Contacts,
}

impl View {
    /// Views reachable from the tab bar, in tab order
    pub const TABS: [View; 4] = [View::Summary, View::Board, View::AddTask, View::Contacts];

    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Log in",
            View::Signup => "Sign up",
            View::Summary => "Summary",
            View::Board => "Board",
            View::AddTask => "Add task",
            View::Contacts => "Contacts",
        }
    }

    pub fn needs_session(self) -> bool {
        !matches!(self, View::Login | View::Signup)
    }
}

/// Current interaction mode on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    /// Keyboard move of the selected card
    Move,
}

/// Cursor on the board: column and row among the visible cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardCursor {
    pub column: usize,
    pub row: usize,
}

/// Keyboard move in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    pub key: String,
    pub from: TaskStatus,
    pub target: TaskStatus,
}

/// Task detail overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub key: String,
    pub subtask_cursor: usize,
}

/// Something waiting for a y/n confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Task(String),
    Contact(String),
}

/// Status-row message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub store: Box<dyn DocumentStore>,
    pub session: Option<Session>,
    /// Where session.json lives; `None` keeps the session in memory only
    pub session_dir: Option<PathBuf>,
    /// Users registered through the signup view (never persisted)
    pub local_users: Vec<User>,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub notice: Option<Notice>,

    // -- board --
    pub cursor: BoardCursor,
    /// Query being typed in search mode
    pub search_input: String,
    pub filter: Filter,
    pub drag: DragEngine,
    /// Card geometry from the last rendered frame
    pub layout: BoardLayout,
    pub flash: Option<(String, Instant)>,
    pub move_state: Option<MoveState>,
    pub detail: Option<DetailState>,
    pub edit_form: Option<TaskForm>,
    pub pending_delete: Option<PendingDelete>,

    // -- add task --
    pub task_form: TaskForm,

    // -- contacts --
    pub contact_cursor: usize,
    pub contact_form: Option<ContactForm>,

    // -- auth --
    pub login_form: LoginForm,
    pub signup_form: SignupForm,
}

impl App {
    pub fn new(store: Box<dyn DocumentStore>, config: &AppConfig) -> Self {
        App {
            board: Board::new(),
            store,
            session: None,
            session_dir: None,
            local_users: Vec::new(),
            view: View::Login,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
            notice: None,
            cursor: BoardCursor::default(),
            search_input: String::new(),
            filter: Filter::default(),
            drag: DragEngine::new(i32::from(config.ui.drag_threshold)),
            layout: BoardLayout::default(),
            flash: None,
            move_state: None,
            detail: None,
            edit_form: None,
            pending_delete: None,
            task_form: TaskForm::new(TaskStatus::ToDo),
            contact_cursor: 0,
            contact_form: None,
            login_form: LoginForm::new(),
            signup_form: SignupForm::new(),
        }
    }

    // -- notices --

    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
        });
    }

    /// Log a failed operation and surface it in the status row
    pub fn report(&mut self, what: &str, err: &dyn std::error::Error) {
        tracing::warn!(error = %err, "{what} failed");
        self.notice = Some(Notice {
            text: format!("{what} failed: {err}"),
            is_error: true,
        });
    }

    // -- session --

    /// Restore a saved session, going straight to the summary if there is one
    pub fn restore_session(&mut self) {
        let Some(dir) = &self.session_dir else {
            return;
        };
        if let Some(session) = read_session(dir) {
            tracing::info!(role = ?session.user_role, "session restored");
            self.start_session(session);
        }
    }

    /// Enter the app as `session` and persist it
    pub fn start_session(&mut self, session: Session) {
        if let Some(dir) = &self.session_dir
            && let Err(e) = write_session(dir, &session)
        {
            tracing::warn!(error = %e, "could not save session");
        }
        self.session = Some(session);
        self.login_form = LoginForm::new();
        self.switch_view(View::Summary);
    }

    pub fn logout(&mut self) {
        if let Some(dir) = &self.session_dir
            && let Err(e) = clear_session(dir)
        {
            tracing::warn!(error = %e, "could not clear session");
        }
        tracing::info!("logged out");
        self.session = None;
        self.board = Board::new();
        self.detail = None;
        self.edit_form = None;
        self.move_state = None;
        self.drag.cancel();
        self.mode = Mode::Navigate;
        self.view = View::Login;
    }

    /// Name to greet, `None` for guests
    pub fn user_name(&self) -> Option<&str> {
        self.session
            .as_ref()
            .filter(|s| !s.is_guest())
            .and_then(|s| s.user_name.as_deref())
    }

    // -- views --

    /// Show `view`, reloading the board from the store for app views
    pub fn switch_view(&mut self, view: View) {
        if view.needs_session() && self.session.is_none() {
            self.view = View::Login;
            return;
        }
        self.view = view;
        self.mode = Mode::Navigate;
        self.detail = None;
        self.move_state = None;
        self.drag.cancel();
        if view.needs_session() {
            self.reload();
        }
    }

    /// Rebuild the board from the store; on failure keep what we have
    pub fn reload(&mut self) {
        match load_board(self.store.as_ref()) {
            Ok(board) => {
                self.board = board;
                self.clamp_cursor();
                self.clamp_contact_cursor();
            }
            Err(e) => self.report("Loading the board", &e),
        }
    }

    /// Open the add-task view with a fresh form for `status`
    pub fn open_add_task(&mut self, status: TaskStatus) {
        self.task_form = TaskForm::new(status);
        self.switch_view(View::AddTask);
    }

    // -- board --

    pub fn cursor_status(&self) -> TaskStatus {
        TaskStatus::from_index(self.cursor.column).unwrap_or(TaskStatus::ToDo)
    }

    /// Keys of visible cards in a column
    pub fn column_keys(&self, status: TaskStatus) -> Vec<String> {
        visible_keys(&self.board, status, &self.filter)
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Key of the card under the keyboard cursor
    pub fn cursor_key(&self) -> Option<String> {
        self.column_keys(self.cursor_status())
            .into_iter()
            .nth(self.cursor.row)
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor.column = self.cursor.column.min(TaskStatus::ALL.len() - 1);
        let len = self.column_keys(self.cursor_status()).len();
        self.cursor.row = self.cursor.row.min(len.saturating_sub(1));
    }

    /// Put the cursor on `key`, wherever it is
    pub fn select_task(&mut self, key: &str) {
        let Some(task) = self.board.task(key) else {
            return;
        };
        let status = task.status;
        self.cursor.column = status.index();
        self.cursor.row = self
            .column_keys(status)
            .iter()
            .position(|k| k == key)
            .unwrap_or(0);
    }

    /// Set the live filter
    pub fn set_filter(&mut self, query: &str) {
        self.filter = Filter::new(query);
        self.clamp_cursor();
    }

    /// Regex for highlighting matches of the active filter
    pub fn active_search_re(&self) -> Option<Regex> {
        self.filter.highlight_regex()
    }

    /// Persist a card move, highlight the card, and follow it with the cursor.
    ///
    /// The local move stands even if the store call fails.
    pub fn apply_move(&mut self, key: &str, status: TaskStatus) {
        match task_ops::move_task(self.store.as_ref(), &mut self.board, key, status) {
            Ok(()) => {}
            Err(TaskError::NotFound(k)) => {
                tracing::warn!(key = %k, "move of unknown task ignored");
                return;
            }
            Err(e) => self.report("Saving the move", &e),
        }
        self.flash = Some((key.to_string(), Instant::now()));
        self.select_task(key);
    }

    pub fn is_flashing(&self, key: &str) -> bool {
        matches!(&self.flash, Some((k, at)) if k == key && at.elapsed() < FLASH_DURATION)
    }

    pub fn expire_flash(&mut self) {
        if let Some((_, at)) = &self.flash
            && at.elapsed() >= FLASH_DURATION
        {
            self.flash = None;
        }
    }

    pub fn open_detail(&mut self, key: &str) {
        if self.board.task(key).is_some() {
            self.detail = Some(DetailState {
                key: key.to_string(),
                subtask_cursor: 0,
            });
        }
    }

    // -- contacts --

    pub fn contact_keys(&self) -> Vec<String> {
        let groups = contact_list(&self.board);
        flat_keys(&groups).into_iter().map(String::from).collect()
    }

    pub fn cursor_contact_key(&self) -> Option<String> {
        self.contact_keys().into_iter().nth(self.contact_cursor)
    }

    pub fn clamp_contact_cursor(&mut self) {
        let len = self.contact_keys().len();
        self.contact_cursor = self.contact_cursor.min(len.saturating_sub(1));
    }

    pub fn select_contact(&mut self, key: &str) {
        if let Some(pos) = self.contact_keys().iter().position(|k| k == key) {
            self.contact_cursor = pos;
        }
    }
}

/// Run the TUI application
pub fn run(
    store: Box<dyn DocumentStore>,
    config: &AppConfig,
    session_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, config);
    app.session_dir = Some(session_dir);
    app.restore_session();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tracing::info!("tui started");
    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    tracing::info!("tui stopped");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.expire_flash();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use serde_json::json;

    fn app() -> App {
        let store = MemoryStore::with_root(json!({
            "tasks": {
                "1": {"id": 1, "title": "A", "status": "to_do"},
                "2": {"id": 2, "title": "B", "status": "to_do"},
                "3": {"id": 3, "title": "C", "status": "done"}
            }
        }));
        let mut app = App::new(Box::new(store), &AppConfig::default());
        app.start_session(Session::guest());
        app
    }

    #[test]
    fn app_views_require_a_session() {
        let mut app = App::new(Box::new(MemoryStore::new()), &AppConfig::default());
        app.switch_view(View::Board);
        assert_eq!(app.view, View::Login);
    }

    #[test]
    fn starting_a_session_loads_the_board() {
        let app = app();
        assert_eq!(app.view, View::Summary);
        assert_eq!(app.board.tasks.len(), 3);
        assert_eq!(app.user_name(), None);
    }

    #[test]
    fn cursor_follows_filter_and_moves() {
        let mut app = app();
        app.cursor.row = 1;
        assert_eq!(app.cursor_key().as_deref(), Some("2"));
        app.set_filter("a");
        assert_eq!(app.cursor.row, 0);
        assert_eq!(app.cursor_key().as_deref(), Some("1"));

        app.set_filter("");
        app.apply_move("2", TaskStatus::Done);
        assert_eq!(app.cursor_status(), TaskStatus::Done);
        assert_eq!(app.cursor_key().as_deref(), Some("2"));
        assert!(app.is_flashing("2"));
        assert!(!app.is_flashing("1"));
    }

    #[test]
    fn logout_returns_to_login() {
        let mut app = app();
        app.logout();
        assert_eq!(app.view, View::Login);
        assert!(app.session.is_none());
        assert!(app.board.tasks.is_empty());
    }
}
