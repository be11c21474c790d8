//! Optional subscriber setup for applications that do not install their own.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber logging at `level`.
///
/// `RUST_LOG` takes precedence when set. `None` or an unrecognised level
/// falls back to `info`. Returns `false` if a global subscriber was already
/// installed, in which case nothing changes.
pub fn init(level: Option<&str>) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(parse_level(level).into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Map a level name to a filter, case-insensitively.
///
/// Accepts the `tracing` names plus `warning`, `critical` and `fatal`.
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    let Some(level) = level else {
        return LevelFilter::INFO;
    };
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" | "critical" | "fatal" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}
