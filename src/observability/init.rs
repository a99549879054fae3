//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Level resolution:
/// 1. `RUST_LOG` if set
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// With `config.log_file` set, events are written as JSON lines to a rotating
/// file (see [`FileWriter`]); otherwise as plain text to stderr.
///
/// # Initialization Behavior
///
/// - Creates the log file's parent directory; falls back to stderr if that fails
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use tripline::observability::init_tracing;
/// use tripline::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = config.log_file.as_ref().filter(|path| {
        path.parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or(true, |dir| std::fs::create_dir_all(dir).is_ok())
    });

    let result = match log_file {
        Some(path) => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(FileWriter::new(path.clone())),
            )
            .try_init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(trace_level = level, log_file = ?log_file, "tracing initialized");
    }
}
