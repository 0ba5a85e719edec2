//! Logging initialization

use crate::config::LogLevel;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

/// Initialize tracing at the configured level
///
/// `RUST_LOG` directives, when set, are layered on top of the level.
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(level: LogLevel) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .map(|f| f.add_directive(level_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}

fn level_directive(level: LogLevel) -> Directive {
    match level {
        LogLevel::Debug => LevelFilter::DEBUG.into(),
        LogLevel::Info => LevelFilter::INFO.into(),
        LogLevel::Warn => LevelFilter::WARN.into(),
        LogLevel::Error => LevelFilter::ERROR.into(),
    }
}
