//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Environment variable selecting JSON log lines instead of the compact format.
pub const LOG_FORMAT_ENV: &str = "BLEPP_LOG_FORMAT";

/// Initialize tracing. Safe to call multiple times.
///
/// `verbose` raises the default level from WARN to DEBUG; `RUST_LOG` directives
/// still apply on top of it.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let level = if is_test || verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };
        let filter = EnvFilter::from_default_env().add_directive(level.into());

        if is_test {
            // Another harness may already own the global subscriber.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .compact()
                .with_test_writer()
                .finish()
                .try_init();
            return;
        }

        let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));
        let result = if json {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(true)
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr)
                .compact()
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e)
        }
    });
}
