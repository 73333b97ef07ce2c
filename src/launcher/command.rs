// src/launcher/command.rs

use std::io;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::Command;

use nix::sys::signal::{SigHandler, signal};

use crate::config::LaunchRequest;
use crate::handshake::READY_SIGNAL;
use crate::types::DisplayId;

/// A fully resolved display-server invocation for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub display: DisplayId,
}

impl ServerCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, display: DisplayId) -> Self {
        Self {
            program: program.into(),
            args,
            display,
        }
    }

    /// `Xvfb -once -terminate -screen 0 <screen> <display>`: single session,
    /// exit once the last client disconnects, display address last.
    pub fn xvfb(request: &LaunchRequest, display: DisplayId) -> Self {
        let args = vec![
            "-once".to_string(),
            "-terminate".to_string(),
            "-screen".to_string(),
            "0".to_string(),
            request.screen.clone(),
            display.address(),
        ];
        Self::new(request.binary.clone(), args, display)
    }

    /// Build the `Command`, with the ready signal ignored in the child before
    /// exec. An inherited ignored `SIGUSR1` is what makes the server signal
    /// its parent once it is ready.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        // SAFETY: the hook only calls signal(2), which is async-signal-safe.
        unsafe {
            cmd.pre_exec(ignore_ready_signal);
        }
        cmd
    }
}

fn ignore_ready_signal() -> io::Result<()> {
    // SAFETY: SigIgn installs no handler code.
    unsafe { signal(READY_SIGNAL, SigHandler::SigIgn) }
        .map(drop)
        .map_err(io::Error::from)
}
