//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, with timestamps.
    #[default]
    Json,
    /// Human-readable lines for interactive use.
    Pretty,
}

/// Initialize tracing/logging for the process.
///
/// Filter comes from `RUST_LOG`. Logs are written to stderr so stdout stays
/// reserved for command output. Safe to call multiple times (subsequent calls
/// are no-ops).
pub fn init(format: LogFormat) {
    let filter = env_filter();

    let _ = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
