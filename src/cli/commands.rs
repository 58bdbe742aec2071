use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - kanban board in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Store URL (https://…, file:///path/db.json); overrides config.toml
    #[arg(long, global = true, env = "TASKBOARD_STORE")]
    pub store: Option<String>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Use a different config file
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the board, one section per column
    Board(BoardArgs),
    /// Show task details
    Show(ShowArgs),
    /// Search tasks by title and description
    Search(SearchArgs),
    /// Show the summary counters
    Summary,
    /// List contacts grouped by letter
    Contacts,
    /// Add a task
    Add(AddArgs),
    /// Move a task to another column
    Mv(MvArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Toggle, add or remove subtasks
    Subtask(SubtaskCmd),
    /// Add, edit or remove contacts
    Contact(ContactCmd),
    /// Log in with email and password
    Login(LoginArgs),
    /// Start a guest session
    Guest,
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// View or change config.toml
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardArgs {
    /// Only show tasks whose title or description contains this text
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task key
    pub key: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    pub query: String,
}

// ---------------------------------------------------------------------------
// Task write args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: String,
    /// Category ("Technical Task" or "User Story")
    #[arg(long)]
    pub category: String,
    /// Priority (urgent, medium, low)
    #[arg(long, default_value = "medium")]
    pub priority: String,
    /// Column (todo, in_progress, await_feedback, done)
    #[arg(long, default_value = "to_do")]
    pub status: String,
    /// Description
    #[arg(long = "desc", alias = "description")]
    pub description: Option<String>,
    /// Assign a contact by name (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub assign: Vec<String>,
    /// Add a subtask (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub subtask: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task key
    pub key: String,
    /// Target column (todo, in_progress, await_feedback, done)
    pub status: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task key
    pub key: String,
}

#[derive(Args)]
pub struct SubtaskCmd {
    #[command(subcommand)]
    pub action: SubtaskAction,
}

#[derive(Subcommand)]
pub enum SubtaskAction {
    /// Move a subtask between pending and done
    Toggle(SubtaskArgs),
    /// Append a pending subtask
    Add(SubtaskArgs),
    /// Remove a subtask
    Rm(SubtaskArgs),
}

#[derive(Args)]
pub struct SubtaskArgs {
    /// Task key
    pub key: String,
    /// Subtask text (exact match for toggle and rm)
    pub text: String,
}

// ---------------------------------------------------------------------------
// Contact args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ContactCmd {
    #[command(subcommand)]
    pub action: ContactAction,
}

#[derive(Subcommand)]
pub enum ContactAction {
    /// Create a contact
    Add(ContactAddArgs),
    /// Change a contact's fields
    Edit(ContactEditArgs),
    /// Delete a contact
    Rm(ContactRmArgs),
}

#[derive(Args)]
pub struct ContactAddArgs {
    /// Full name
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Args)]
pub struct ContactEditArgs {
    /// Contact key
    pub key: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Args)]
pub struct ContactRmArgs {
    /// Contact key
    pub key: String,
}

// ---------------------------------------------------------------------------
// Session args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Config args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set a key (store.url, session.dir, ui.drag_threshold, ui.show_key_hints, ui.colors.<slot>)
    Set(ConfigSetArgs),
    /// Print the config file path
    Path,
    /// Write a commented config.toml
    Init(ConfigInitArgs),
}

#[derive(Args)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    pub key: String,
    pub value: String,
}
