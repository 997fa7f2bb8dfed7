use tracing_subscriber::{EnvFilter, fmt};

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize the logging system with JSON formatting and environment-based filtering.
///
/// - `RUST_LOG` drives the filter, defaulting to [`DEFAULT_LOG_FILTER`]
/// - events are emitted as flattened JSON, one object per line
pub fn init_normal_logging() {
    fmt()
        .with_env_filter(env_filter())
        .json()
        .flatten_event(true)
        .init();
}

pub fn init_logging() {
    // tokio-console owns the subscriber when enabled.
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
    } else {
        init_normal_logging();
    }
}

fn init_console_logging() {
    console_subscriber::init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
