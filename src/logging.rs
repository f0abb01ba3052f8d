//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_ENV: &str = "ABAPSCAN_LOG";

/// Installs the stderr subscriber.
///
/// Reads `ABAPSCAN_LOG` (e.g. `ABAPSCAN_LOG=abapscan_core=trace`). Falls back to
/// `warn`, or `debug` when `verbose` is set. Calling it more than once is a no-op.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "abapscan_core=debug" } else { "abapscan_core=warn" };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
