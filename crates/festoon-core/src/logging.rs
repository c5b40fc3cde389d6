#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! Effects log through `tracing` macros directly. Native hosts that want the
//! events on stderr enable the `tracing-json` feature and call
//! [`init_tracing`]; browser hosts leave the default no-subscriber setup, in
//! which the macros cost a relaxed atomic load.

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "FESTOON_LOG";

/// Filter used when neither environment variable is set.
pub const DEFAULT_FILTER: &str = "info";

/// Pick the filter directive: `FESTOON_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
#[must_use]
pub fn filter_directive(festoon_log: Option<&str>, rust_log: Option<&str>) -> String {
    [festoon_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_owned()
}

/// Install a global JSON-lines subscriber on stderr.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let festoon_log = std::env::var(LOG_ENV_VAR).ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(festoon_log.as_deref(), rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_crate_variable() {
        assert_eq!(filter_directive(Some("debug"), Some("warn")), "debug");
    }

    #[test]
    fn falls_back_to_rust_log_then_default() {
        assert_eq!(filter_directive(None, Some("festoon_fx=trace")), "festoon_fx=trace");
        assert_eq!(filter_directive(Some(" "), None), DEFAULT_FILTER);
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_tracing();
        assert!(!init_tracing());
    }
}
