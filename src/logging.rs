use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file when none is configured.
pub const LOG_ENV_VAR: &str = "GHIBLI_CATALOG_LOG";

/// Pick the log file: command line, then config file, then environment.
pub fn resolve_log_file(configured: Option<PathBuf>) -> Option<PathBuf> {
    configured.or_else(|| std::env::var_os(LOG_ENV_VAR).map(PathBuf::from))
}

/// Initialize tracing with optional file output.
///
/// Logging is disabled when no file is given, since the terminal belongs to
/// the UI. The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(log_file: Option<&Path>) {
    let Some(log_path) = log_file else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to open log file {}: {e}", log_path.display());
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
