//! Grid Assist — a terminal data grid with a natural-language filter.
//!
//! This is the app shell that wires together:
//! - Startup configuration (config.rs)
//! - The completion pipeline (llm/, pipeline.rs)
//! - Session state (session.rs) over the grid domain (grid/)
//! - The terminal display surface (ui/)

pub mod config;
pub mod grid;
pub mod llm;
pub mod pipeline;
pub mod session;
pub mod ui;

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use config::{Config, ConfigError};
use llm::CompletionClient;
use session::Session;
use ui::UiError;

/// Entry point — called by the binary.
pub fn run() -> Result<(), StartupError> {
    init_logging();
    log::info!("Grid Assist starting up");

    let config = Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;
    // Request tasks are spawned from the UI thread.
    let _guard = runtime.enter();

    let client = CompletionClient::new(&config.api_key);
    let (pipeline, events) = pipeline::channel();
    let app = ui::App::new(Session::seeded(), client, pipeline, events);

    ui::run(app)?;

    log::info!("Grid Assist shutting down");
    Ok(())
}

/// Route `log` output to a file; the terminal belongs to the UI.
///
/// Level comes from `RUST_LOG`, default `info`.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.write_style(env_logger::WriteStyle::Never);

    match open_log_file() {
        Some(file) => builder.target(env_logger::Target::Pipe(Box::new(file))),
        None => builder.target(env_logger::Target::Pipe(Box::new(std::io::sink()))),
    };

    let _ = builder.try_init();
}

/// Log file location:
///   Linux:   ~/.local/share/grid-assist/grid-assist.log
///   macOS:   ~/Library/Application Support/grid-assist/grid-assist.log
///   Windows: %LOCALAPPDATA%/grid-assist/grid-assist.log
pub fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("grid-assist")
        .join("grid-assist.log")
}

fn open_log_file() -> Option<File> {
    let path = log_file_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error(transparent)]
    Ui(#[from] UiError),
}
