//! Diagnostic logging via `tracing`.
//!
//! User-facing messages go through `cli::output`; this only covers the
//! developer-facing trace of loads, persists and recoveries, written to
//! stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "NOTEVAULT_LOG";

/// Install the global subscriber.
///
/// `NOTEVAULT_LOG` wins when set; otherwise `notevault=debug` with
/// `verbose` and `warn` without. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("notevault=debug")
        } else {
            EnvFilter::new("warn")
        }
    })
}
