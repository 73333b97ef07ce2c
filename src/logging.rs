// src/logging.rs

//! Stderr diagnostics for the `xvfb-launch` binary.
//!
//! The launcher logs each attempt (spawn, ready, kill) at `info`/`error` and
//! the handshake internals at `debug`/`trace`. Filtering is decided once:
//! `--log-level` wins and applies to this crate only, otherwise
//! `XVFB_LAUNCH_LOG` is read as a full filter directive
//! (e.g. `xvfb_launch::handshake=trace`), otherwise `info`.
//!
//! Stdout is left to the display address and the wrapped command.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "XVFB_LAUNCH_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(cli_directive(level)),
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Our own crate at the requested level; dependencies stay at `warn`.
fn cli_directive(level: LogLevel) -> String {
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };
    format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))
}
