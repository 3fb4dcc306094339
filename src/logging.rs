//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Everything is written to stderr so that stdout stays free for XML output.
//!
//! - `info`: duplicate headers, per-file batch results
//! - `debug`: file and sheet details (`-v`)
//!
//! `RUST_LOG` overrides the level chosen on the command line.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "tabkit=debug"
    } else {
        "tabkit=info"
    }
}

/// Install the global subscriber. Later calls leave the first one in place.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
