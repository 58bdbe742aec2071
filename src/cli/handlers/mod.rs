mod init;
pub use init::cmd_config_init;

use std::path::Path;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::form::{ContactForm, FieldError, TaskForm};
use crate::io::board_io::load_board;
use crate::io::config_io;
use crate::io::session::{clear_session, read_session, write_session};
use crate::io::store::{DocumentStore, StoreError, open_store};
use crate::model::board::Board;
use crate::model::config::AppConfig;
use crate::model::task::{CATEGORIES, Priority, Task, TaskStatus};
use crate::model::user::Session;
use crate::ops::search::{Filter, search_tasks};
use crate::ops::{contact_ops, task_ops, user_ops};
use crate::view::board::board_view;
use crate::view::contacts::contact_list;
use crate::view::detail::task_detail;
use crate::view::summary::summary;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand. `config` already carries any `--store` override.
pub fn dispatch(cli: Cli, config: &AppConfig, config_path: &Path) -> CmdResult {
    let json = cli.json;

    match cli.command {
        None => Err("no command given (run `tb` without arguments for the board)".into()),
        Some(cmd) => match cmd {
            // Read commands
            Commands::Board(args) => cmd_board(args, config, json),
            Commands::Show(args) => cmd_show(args, config, json),
            Commands::Search(args) => cmd_search(args, config, json),
            Commands::Summary => cmd_summary(config, json),
            Commands::Contacts => cmd_contacts(config, json),

            // Task writes
            Commands::Add(args) => cmd_add(args, config),
            Commands::Mv(args) => cmd_mv(args, config),
            Commands::Rm(args) => cmd_rm(args, config),
            Commands::Subtask(args) => cmd_subtask(args, config),

            // Contacts
            Commands::Contact(args) => cmd_contact(args, config),

            // Session
            Commands::Login(args) => cmd_login(args, config),
            Commands::Guest => cmd_guest(config),
            Commands::Logout => cmd_logout(config),
            Commands::Whoami => cmd_whoami(config, json),

            Commands::Config(args) => cmd_config(args, config, config_path),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn connect(config: &AppConfig) -> Result<Box<dyn DocumentStore>, StoreError> {
    let url = config.store.url.as_deref().ok_or(StoreError::NotConfigured)?;
    open_store(url)
}

/// Open the store and load the whole board
fn load(config: &AppConfig) -> Result<(Box<dyn DocumentStore>, Board), StoreError> {
    let store = connect(config)?;
    let board = load_board(store.as_ref())?;
    Ok((store, board))
}

pub fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s).ok_or_else(|| {
        format!(
            "invalid status: {} (expected to_do, in_progress, await_feedback or done)",
            s
        )
    })
}

pub fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s)
        .ok_or_else(|| format!("invalid priority: {} (expected urgent, medium or low)", s))
}

/// Match a category case-insensitively against the offered ones
pub fn parse_category(s: &str) -> Result<&'static str, String> {
    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(s.trim()))
        .copied()
        .ok_or_else(|| format!("invalid category: {} (expected {})", s, CATEGORIES.join(" or ")))
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field.label(), e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build a task the way the add-task form does: required fields first,
/// assignees resolved to existing contacts by name.
pub fn build_task(board: &Board, args: &AddArgs) -> Result<Task, String> {
    let mut form = TaskForm::new(parse_status(&args.status)?);
    form.title.set(&args.title);
    form.duedate.set(&args.due);
    if !args.category.trim().is_empty() {
        form.category = parse_category(&args.category)?.to_string();
    }
    form.set_priority(parse_priority(&args.priority)?);
    if let Some(ref desc) = args.description {
        form.description.set(desc);
    }
    for name in &args.assign {
        let (_, contact) = board
            .find_contact_by_name(name)
            .ok_or_else(|| format!("no contact named {}", name))?;
        if !form.is_assigned(&contact.name) {
            form.toggle_assignee(&contact.name);
        }
    }

    let mut task = form.validate().map_err(|e| format_field_errors(&e))?;
    task.subtasks = args
        .subtask
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(task)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_board(args: BoardArgs, config: &AppConfig, json: bool) -> CmdResult {
    let (_, board) = load(config)?;
    let filter = Filter::new(args.filter.as_deref().unwrap_or(""));
    let view = board_view(&board, &filter);
    if json {
        return print_json(&board_to_json(&view));
    }
    if !filter.is_empty() && view.card_count() == 0 {
        println!("No results found");
        return Ok(());
    }
    for line in format_board(&view) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, config: &AppConfig, json: bool) -> CmdResult {
    let (_, board) = load(config)?;
    let view = task_detail(&board, &args.key)
        .ok_or_else(|| format!("task not found: {}", args.key))?;
    if json {
        return print_json(&detail_to_json(&view));
    }
    for line in format_task_detail(&view) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, config: &AppConfig, json: bool) -> CmdResult {
    let (_, board) = load(config)?;
    let hits = search_tasks(&board, &args.query);
    if json {
        let out: Vec<SearchHitJson> = hits.iter().map(hit_to_json).collect();
        return print_json(&out);
    }
    if hits.is_empty() {
        println!("No results found");
        return Ok(());
    }
    for hit in &hits {
        let title = board
            .task(&hit.task_key)
            .map(|t| t.title.as_str())
            .unwrap_or("");
        println!(
            "{:>4}  [{}] {} ({}: {})",
            hit.task_key,
            hit.status.label(),
            title,
            hit.field.as_str(),
            hit.text
        );
    }
    Ok(())
}

fn cmd_summary(config: &AppConfig, json: bool) -> CmdResult {
    let (_, board) = load(config)?;
    let session = read_session(&config_io::session_dir(config));
    let user_name = session
        .as_ref()
        .filter(|s| !s.is_guest())
        .and_then(|s| s.user_name.as_deref());
    let view = summary(&board, user_name, Local::now().naive_local());
    if json {
        return print_json(&summary_to_json(&view));
    }
    for line in format_summary(&view) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_contacts(config: &AppConfig, json: bool) -> CmdResult {
    let (_, board) = load(config)?;
    let groups = contact_list(&board);
    if json {
        return print_json(&contacts_to_json(&groups));
    }
    if groups.is_empty() {
        println!("No contacts");
        return Ok(());
    }
    for line in format_contacts(&groups) {
        println!("{}", line);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task writes
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, config: &AppConfig) -> CmdResult {
    let (store, mut board) = load(config)?;
    let task = build_task(&board, &args)?;
    let key = task_ops::add_task(store.as_ref(), &mut board, task)?;
    println!("{}", key);
    Ok(())
}

fn cmd_mv(args: MvArgs, config: &AppConfig) -> CmdResult {
    let status = parse_status(&args.status)?;
    let (store, mut board) = load(config)?;
    task_ops::move_task(store.as_ref(), &mut board, &args.key, status)?;
    println!("{} -> {}", args.key, status.label());
    Ok(())
}

fn cmd_rm(args: RmArgs, config: &AppConfig) -> CmdResult {
    let (store, mut board) = load(config)?;
    let task = task_ops::delete_task(store.as_ref(), &mut board, &args.key)?;
    println!("Deleted {} {}", args.key, task.title);
    Ok(())
}

fn cmd_subtask(args: SubtaskCmd, config: &AppConfig) -> CmdResult {
    let (store, mut board) = load(config)?;
    match args.action {
        SubtaskAction::Toggle(a) => {
            let done = task_ops::toggle_subtask(store.as_ref(), &mut board, &a.key, &a.text)?;
            let mark = if done { 'x' } else { ' ' };
            println!("[{}] {}", mark, a.text);
        }
        SubtaskAction::Add(a) => {
            if a.text.trim().is_empty() {
                return Err("subtask text cannot be empty".into());
            }
            task_ops::add_subtask(store.as_ref(), &mut board, &a.key, &a.text)?;
        }
        SubtaskAction::Rm(a) => {
            task_ops::remove_subtask(store.as_ref(), &mut board, &a.key, &a.text)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

fn cmd_contact(args: ContactCmd, config: &AppConfig) -> CmdResult {
    let (store, mut board) = load(config)?;
    match args.action {
        ContactAction::Add(a) => {
            let mut form = ContactForm::new();
            form.name.set(&a.name);
            form.email.set(&a.email);
            form.phone.set(&a.phone);
            let contact = form.validate().map_err(|e| format_field_errors(&e))?;
            let key = contact_ops::add_contact(store.as_ref(), &mut board, contact)?;
            println!("{}", key);
        }
        ContactAction::Edit(a) => {
            let existing = board
                .contact(&a.key)
                .ok_or_else(|| format!("contact not found: {}", a.key))?;
            let mut form = ContactForm::from_contact(&a.key, existing);
            if let Some(ref name) = a.name {
                form.name.set(name);
            }
            if let Some(ref email) = a.email {
                form.email.set(email);
            }
            if let Some(ref phone) = a.phone {
                form.phone.set(phone);
            }
            let contact = form.validate().map_err(|e| format_field_errors(&e))?;
            contact_ops::update_contact(store.as_ref(), &mut board, &a.key, contact)?;
        }
        ContactAction::Rm(a) => {
            let contact = contact_ops::delete_contact(store.as_ref(), &mut board, &a.key)?;
            println!("Deleted {} {}", a.key, contact.name);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

fn cmd_login(args: LoginArgs, config: &AppConfig) -> CmdResult {
    let store = connect(config)?;
    // Signups made in the terminal are not persisted, so only stored users count
    let user = user_ops::login(store.as_ref(), &[], &args.email, &args.password)?;
    write_session(&config_io::session_dir(config), &Session::user(&user))?;
    println!("Logged in as {}", user.name);
    Ok(())
}

fn cmd_guest(config: &AppConfig) -> CmdResult {
    write_session(&config_io::session_dir(config), &Session::guest())?;
    println!("Logged in as guest");
    Ok(())
}

fn cmd_logout(config: &AppConfig) -> CmdResult {
    clear_session(&config_io::session_dir(config))?;
    tracing::info!("logout");
    println!("Logged out");
    Ok(())
}

fn cmd_whoami(config: &AppConfig, json: bool) -> CmdResult {
    let session = read_session(&config_io::session_dir(config));
    if json {
        let out = session.map(|s| SessionJson {
            role: if s.is_guest() { "guest" } else { "user" }.to_string(),
            email: s.user_email,
            name: s.user_name,
        });
        return print_json(&out);
    }
    match session {
        None => println!("Not logged in"),
        Some(s) if s.is_guest() => println!("guest"),
        Some(s) => println!(
            "{} <{}>",
            s.user_name.as_deref().unwrap_or(""),
            s.user_email.as_deref().unwrap_or("")
        ),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(args: ConfigCmd, config: &AppConfig, config_path: &Path) -> CmdResult {
    match args.action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigAction::Set(a) => {
            let mut doc = config_io::read_config_doc(config_path)?;
            config_io::set_config_value(&mut doc, &a.key, &a.value)?;
            config_io::write_config_doc(config_path, &doc)?;
            tracing::info!(key = %a.key, "config updated");
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Init(a) => {
            cmd_config_init(a, config_path, config.store.url.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::contact::Contact;

    fn add_args(title: &str) -> AddArgs {
        AddArgs {
            title: title.into(),
            due: "2025-05-01".into(),
            category: "user story".into(),
            priority: "urgent".into(),
            status: "in-progress".into(),
            description: Some("Details".into()),
            assign: vec!["anna meier".into()],
            subtask: vec!["One".into(), "  ".into()],
        }
    }

    fn board() -> Board {
        let mut board = Board::new();
        board.insert_contact("1", Contact::new("Anna Meier", "anna@x.io", "1"));
        board
    }

    #[test]
    fn build_task_normalizes_fields() {
        let task = build_task(&board(), &add_args("Login")).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.category, "User Story");
        assert_eq!(task.assigned, vec!["Anna Meier".to_string()]);
        assert_eq!(task.subtasks, vec!["One".to_string()]);
        assert!(task.subtasks_done.is_empty());
    }

    #[test]
    fn build_task_reports_required_fields() {
        let mut args = add_args("  ");
        args.due = String::new();
        let err = build_task(&board(), &args).unwrap_err();
        assert_eq!(
            err,
            "Title: This field is required; Due date: This field is required"
        );
    }

    #[test]
    fn build_task_rejects_unknown_values() {
        let mut args = add_args("x");
        args.assign = vec!["Nobody".into()];
        assert_eq!(build_task(&board(), &args).unwrap_err(), "no contact named Nobody");

        let mut args = add_args("x");
        args.category = "Epic".into();
        assert!(build_task(&board(), &args).unwrap_err().starts_with("invalid category"));

        let mut args = add_args("x");
        args.status = "later".into();
        assert!(build_task(&board(), &args).unwrap_err().starts_with("invalid status"));
    }
}
