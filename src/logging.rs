use std::{fs::File, io, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// The environment variable used to configure the log filter.
pub const LOG_FILTER_ENV: &str = "SLIDEDECK_LOG";

const DEFAULT_FILTER: &str = "info";

/// Send logs to a file.
///
/// The terminal is owned by the presentation so logs are never written to stdout or stderr.
pub fn init_file_logging(path: &Path) -> Result<(), LoggingError> {
    let file = File::create(path)?;
    let filter = make_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;
    Ok(())
}

fn make_filter(directives: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let directives = directives.filter(|d| !d.trim().is_empty()).unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directives).map_err(|e| LoggingError::Filter(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("creating log file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("installing logger: {0}")]
    Install(String),
}
