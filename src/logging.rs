//! Diagnostic logging
//!
//! Logs go to stderr so stdout only carries command results. The filter is
//! read from `SLACK_LOG` and defaults to `warn`.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "SLACK_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) is harmless.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
