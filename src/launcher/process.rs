// src/launcher/process.rs

use std::process::Child;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::types::DisplayId;

/// Child slot shared between a [`SupervisedProcess`] and the exit-hook
/// registry. `None` once the child has been killed and reaped.
pub(crate) type SharedChild = Arc<Mutex<Option<Child>>>;

/// A display server that signalled ready. Owned by the caller.
///
/// Dropping the handle kills and reaps the server. While the handle is
/// alive the exit hook will also terminate it on normal process exit; a
/// crash or `SIGKILL` of the host leaks it.
#[derive(Debug)]
pub struct SupervisedProcess {
    child: SharedChild,
    pid: u32,
    display: DisplayId,
    attempts: u32,
    startup_time: Duration,
}

impl SupervisedProcess {
    pub(crate) fn new(child: Child, display: DisplayId, attempts: u32, startup_time: Duration) -> Self {
        Self {
            pid: child.id(),
            child: Arc::new(Mutex::new(Some(child))),
            display,
            attempts,
            startup_time,
        }
    }

    pub(crate) fn shared(&self) -> &SharedChild {
        &self.child
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn display(&self) -> DisplayId {
        self.display
    }

    /// 1-based number of the attempt that succeeded.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time between spawning the successful attempt and its ready signal.
    pub fn startup_time(&self) -> Duration {
        self.startup_time
    }

    /// Whether the server is still owned and has not exited.
    pub fn is_running(&self) -> bool {
        let mut slot = self.child.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Kill and reap the server. Idempotent; errors from an already-dead
    /// process are swallowed.
    pub fn terminate(&self) {
        let taken = self
            .child
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut child) = taken {
            debug!(pid = self.pid, display = %self.display, "terminating display server");
            kill_and_reap(&mut child);
        }
    }
}

impl Drop for SupervisedProcess {
    fn drop(&mut self) {
        self.terminate();
    }
}

pub(crate) fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
