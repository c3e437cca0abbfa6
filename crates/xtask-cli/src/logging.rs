//! Tracing subscriber initialisation.
//!
//! Library crates only emit events; the binary installs the subscriber.
//!
//! | Flag     | Filter |
//! |----------|--------|
//! | (none)   | INFO   |
//! | `-v`     | DEBUG  |
//!
//! `RUST_LOG` overrides both.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber, writing to stderr.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level(verbose))?,
    };

    let fmt_layer = fmt::layer()
        .without_time()
        .with_target(verbose)
        .with_level(verbose)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
