//! Logging setup for `tracking`.
//!
//! `RUST_LOG` always wins. Without it the level follows the CLI flags:
//! `-q` → warn, default → info, `-v` → debug, `-vv` → trace.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TEST_INIT: Once = Once::new();

/// Default filter directive for the given verbosity flags.
#[must_use]
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info,tower_http=info",
        1 => "debug,tower_http=debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 0);

    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

/// Install a test-friendly subscriber exactly once per process.
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbosity() {
        assert_eq!(default_directive(2, true), "warn");
    }

    #[test]
    fn verbosity_levels() {
        assert!(default_directive(0, false).starts_with("info"));
        assert!(default_directive(1, false).starts_with("debug"));
        assert_eq!(default_directive(5, false), "trace");
    }

    #[test]
    fn test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }
}
