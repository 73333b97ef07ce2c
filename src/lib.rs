// src/lib.rs

//! Start an Xvfb display server and block until it is ready.
//!
//! Xvfb reports readiness by sending `SIGUSR1` to its parent when it was
//! started with that signal ignored. [`launch_xvfb`] drives that handshake,
//! retries with fresh processes (and fresh random displays) on timeout, and
//! publishes the chosen address in `DISPLAY`.
//!
//! ```no_run
//! let server = xvfb_launch::launch_xvfb(None, 3)?;
//! println!("Xvfb {} on {}", server.pid(), server.display());
//! # Ok::<(), xvfb_launch::errors::XvfbError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod handshake;
pub mod launcher;
pub mod logging;
pub mod session;
pub mod types;

pub use errors::{Result, XvfbError};
pub use launcher::{Launcher, SupervisedProcess, launch_xvfb, terminate_registered};
pub use types::DisplayId;

use anyhow::Context;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{LaunchRequest, RawConfigFile, XvfbSection, load_from_path};

/// High-level entry point used by `main.rs`. Returns the process exit code.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the launcher (on a blocking thread; it parks in `poll(2)`)
/// - running the command, or holding the server until Ctrl-C
pub async fn run(args: CliArgs) -> anyhow::Result<i32> {
    let request = build_request(&args)?;
    debug!(?request, "resolved launch request");

    let process = tokio::task::spawn_blocking(move || -> Result<SupervisedProcess> {
        Launcher::new(request)?.launch()
    })
    .await
    .context("launcher task failed")??;

    let code = if args.command.is_empty() {
        session::hold_until_interrupted(&process).await?;
        0
    } else {
        session::run_with_display(&process, &args.command).await?
    };

    process.terminate();
    Ok(code)
}

/// Resolve the launch request: the `--config` file if given (built-in
/// defaults otherwise), then CLI flags on top, then validation.
pub fn build_request(args: &CliArgs) -> Result<LaunchRequest> {
    let mut raw = match &args.config {
        Some(path) => load_from_path(path)?,
        None => RawConfigFile::default(),
    };

    apply_overrides(&mut raw.xvfb, args);
    LaunchRequest::try_from(raw)
}

fn apply_overrides(section: &mut XvfbSection, args: &CliArgs) {
    if let Some(display) = &args.display {
        section.display = Some(display.clone());
    }
    if let Some(max_tries) = args.max_tries {
        section.max_tries = max_tries;
    }
    if let Some(secs) = args.startup_timeout_secs {
        section.startup_timeout_secs = secs;
    }
    if let Some(screen) = &args.screen {
        section.screen = screen.clone();
    }
    if let Some(binary) = &args.binary {
        section.binary = binary.clone();
    }
}
