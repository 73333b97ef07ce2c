// src/session.rs

//! What the CLI does with a launched server: run a command against it, or
//! hold it until interrupted.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use anyhow::{Context, Result, bail};
use tokio::process::Command;
use tracing::{info, warn};

use crate::launcher::{DISPLAY_ENV, SupervisedProcess};

/// Exit code reported when the session is interrupted with Ctrl-C.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Run `command` with `DISPLAY` set to the server's address and return its
/// exit code. Ctrl-C kills the command.
pub async fn run_with_display(process: &SupervisedProcess, command: &[String]) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        bail!("no command given");
    };

    info!(
        display = %process.display(),
        cmd = %command.join(" "),
        "starting command"
    );

    let mut child = Command::new(program)
        .args(args)
        .env(DISPLAY_ENV, process.display().address())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning command '{program}'"))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.with_context(|| format!("waiting for command '{program}'"))?;
            let code = exit_code(status);
            info!(exit_code = code, "command exited");
            Ok(code)
        }
        interrupted = tokio::signal::ctrl_c() => {
            interrupted.context("listening for Ctrl-C")?;
            info!("interrupted; killing command");
            if let Err(e) = child.kill().await {
                warn!(error = %e, "failed to kill command");
            }
            Ok(INTERRUPTED_EXIT_CODE)
        }
    }
}

/// Print the display address and keep the server alive until Ctrl-C.
pub async fn hold_until_interrupted(process: &SupervisedProcess) -> Result<()> {
    println!("{}", process.display());
    info!(pid = process.pid(), display = %process.display(), "holding display server; Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("listening for Ctrl-C")?;
    Ok(())
}

/// Shell-style exit code: the status code, or 128 + signal number.
pub fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_shell_convention() {
        assert_eq!(exit_code(ExitStatus::from_raw(0)), 0);
        // wait(2) encodes exit code 3 in the high byte.
        assert_eq!(exit_code(ExitStatus::from_raw(3 << 8)), 3);
        // Killed by SIGKILL (9).
        assert_eq!(exit_code(ExitStatus::from_raw(9)), 137);
    }
}
