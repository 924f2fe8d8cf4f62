//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so that command output on stdout (tables, CSV,
//! JSON) stays clean for piping.
//!
//! Environment variables:
//! - RUST_LOG=filter (default: warn; `--verbose` raises this crate to debug)

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> String {
    if verbose {
        "warn,pick_duel=debug".to_string()
    } else {
        "warn".to_string()
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logging(verbose: bool) {
    let filter = default_filter(verbose);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbose)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(filter = %filter, "logging initialized");
    }
}
