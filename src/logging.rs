//! Diagnostic logging to stderr.
//!
//! Command results are printed by the report module; tracing output is for
//! diagnostics only. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("babeljob=debug")
        } else {
            EnvFilter::new("babeljob=warn")
        }
    });

    // Already initialized when embedded in another binary or a test harness.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
