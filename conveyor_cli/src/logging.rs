//! Logging initialization.
//!
//! `RUST_LOG` wins when set (e.g. `RUST_LOG=conveyor_core=debug`); otherwise
//! the configured `log_level` applies. Logs go to stderr so `--json` output
//! on stdout stays machine-readable.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter from `RUST_LOG`, falling back to `default_level`
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber.
pub fn init(default_level: &str) -> Result<()> {
    fmt()
        .with_env_filter(filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
