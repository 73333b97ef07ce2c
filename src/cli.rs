// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `xvfb-launch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xvfb-launch",
    version,
    about = "Start Xvfb, wait until it is ready, and run a command against it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML), e.g. `XvfbLaunch.toml`.
    ///
    /// If omitted, built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixed display address (e.g. `:55`). Random when omitted.
    #[arg(long, value_name = "DISPLAY")]
    pub display: Option<String>,

    /// Number of start attempts before giving up.
    #[arg(long, value_name = "N")]
    pub max_tries: Option<u32>,

    /// Seconds to wait for the server's ready signal on each attempt.
    #[arg(long = "timeout", value_name = "SECS")]
    pub startup_timeout_secs: Option<u32>,

    /// Screen geometry passed as `-screen 0 <GEOM>`.
    #[arg(long, value_name = "GEOM")]
    pub screen: Option<String>,

    /// Display-server executable.
    #[arg(long, value_name = "PATH")]
    pub binary: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `XVFB_LAUNCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to run with `DISPLAY` pointing at the server.
    ///
    /// Without a command the display address is printed and the server is
    /// held until Ctrl-C.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
