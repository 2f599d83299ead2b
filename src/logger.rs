//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after the effective level is resolved.
//! Output goes to stderr.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Connection-level chatter from the HTTP stacks, kept out of the log unless
/// the level is `trace`.
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn"];

/// Initialise the global tracing subscriber.
///
/// When `prefer_level` is set (a `-v` flag was given) `level` wins over
/// `RUST_LOG`; otherwise `RUST_LOG` wins and `level` is the fallback.
pub fn init(level: &str, prefer_level: bool) -> Result<(), AppError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, env.as_deref(), prefer_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Pick the directive source and build the filter.
///
/// `level` is a plain level (`"info"`) or any `EnvFilter` directive string.
/// A plain level below `trace` gets [`QUIET_DEPENDENCIES`] appended.
pub fn build_filter(level: &str, rust_log: Option<&str>, prefer_level: bool) -> Result<EnvFilter, AppError> {
    let rust_log = rust_log.filter(|v| !v.trim().is_empty());
    let from_level = || EnvFilter::try_new(with_quiet_dependencies(level));

    let filter = match (prefer_level, rust_log) {
        (false, Some(env)) => EnvFilter::try_new(env).or_else(|_| from_level()),
        (true, Some(env)) => from_level().or_else(|_| EnvFilter::try_new(env)),
        (_, None) => from_level(),
    };
    filter.map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))
}

fn with_quiet_dependencies(level: &str) -> String {
    let plain = matches!(level, "error" | "warn" | "info" | "debug");
    if plain {
        std::iter::once(level)
            .chain(QUIET_DEPENDENCIES.iter().copied())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        level.to_string()
    }
}

/// Map `-v` repetitions to a level. Each `-v` raises verbosity one tier:
///
/// ```text
/// -v    → warn
/// -vv   → info
/// -vvv  → debug   (per-request matched terms)
/// -vvvv → trace   (full completion payloads)
/// ```
pub fn level_for_verbosity(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_levels_quiet_http_stacks() {
        assert_eq!(with_quiet_dependencies("info"), "info,hyper=warn,hyper_util=warn,reqwest=warn");
        assert_eq!(with_quiet_dependencies("trace"), "trace");
        assert_eq!(with_quiet_dependencies("ndertimtari_bot=debug"), "ndertimtari_bot=debug");
    }

    #[test]
    fn rust_log_wins_by_default() {
        let f = build_filter("info", Some("ndertimtari_bot=trace"), false).unwrap();
        assert_eq!(f.to_string(), "ndertimtari_bot=trace");
    }

    #[test]
    fn cli_level_wins_when_preferred() {
        let f = build_filter("trace", Some("warn"), true).unwrap();
        assert_eq!(f.to_string(), "trace");
    }

    #[test]
    fn blank_rust_log_is_ignored() {
        let f = build_filter("trace", Some("  "), false).unwrap();
        assert_eq!(f.to_string(), "trace");
    }

    #[test]
    fn invalid_level_errors() {
        let err = build_filter("ndertimtari_bot=loud", None, false).unwrap_err();
        assert!(matches!(err, AppError::Logger(ref m) if m.contains("ndertimtari_bot=loud")));
    }

    #[test]
    fn verbosity_tiers() {
        assert_eq!(level_for_verbosity(0), None);
        assert_eq!(level_for_verbosity(1), Some("warn"));
        assert_eq!(level_for_verbosity(3), Some("debug"));
        assert_eq!(level_for_verbosity(9), Some("trace"));
    }

    #[test]
    fn init_succeeds_or_already_set() {
        // A prior test in this process may have installed a subscriber.
        match init("info", true) {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
