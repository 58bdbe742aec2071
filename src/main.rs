use std::path::{Path, PathBuf};

use clap::Parser;
use taskboard::cli::commands::Cli;
use taskboard::cli::handlers;
use taskboard::io::config_io;
use taskboard::io::store::{StoreError, open_store};
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    let cli = Cli::parse();
    let log_path = std::env::var_os("TASKBOARD_LOG").map(PathBuf::from);
    let _guard = init_logging(&cli.log_level, log_path.as_deref());

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match cli.config.as_deref() {
        Some(path) => PathBuf::from(path),
        None => config_io::default_config_path()?,
    };
    let mut config = config_io::read_config(&config_path)?;
    if let Some(ref url) = cli.store {
        config.store.url = Some(url.clone());
    }

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let url = config.store.url.as_deref().ok_or(StoreError::NotConfigured)?;
            let store = open_store(url)?;
            let session_dir = config_io::session_dir(&config);
            taskboard::tui::run(store, &config, session_dir)
        }
        Some(_) => handlers::dispatch(cli, &config, &config_path),
    }
}

/// File-based logging; stdout belongs to the TUI or to command output.
///
/// The returned guard flushes buffered entries on drop.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
