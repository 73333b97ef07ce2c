// src/handshake/disposition.rs

//! Save / install / restore of the two process-wide signal dispositions.

use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};

use nix::fcntl::OFlag;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use tracing::{debug, warn};

use super::flags;
use crate::errors::Result;

/// Signal the display server sends once it accepts connections.
pub const READY_SIGNAL: Signal = Signal::SIGUSR1;

/// Signal raised by the per-attempt deadline.
pub const TIMEOUT_SIGNAL: Signal = Signal::SIGALRM;

/// Holds the dispositions that were in place before a launch, plus the wake
/// pipe the handlers write to.
///
/// Dropping the guard puts the saved dispositions back, on every exit path.
pub struct SignalGuard {
    saved_ready: SigAction,
    saved_timeout: SigAction,
    wake_rx: OwnedFd,
    // Kept open for the handlers; closed after they are uninstalled.
    _wake_tx: OwnedFd,
}

impl SignalGuard {
    /// Clear the latched flags, open the wake pipe, then install the ready
    /// and timeout handlers.
    pub fn install() -> Result<Self> {
        flags::reset();

        // Non-blocking so a handler never stalls on a full pipe, close-on-exec
        // so spawned servers do not inherit either end.
        let (wake_rx, wake_tx) = nix::unistd::pipe2(OFlag::O_CLOEXEC | OFlag::O_NONBLOCK)?;
        flags::set_wake_fd(Some(wake_tx.as_raw_fd()));

        let saved_ready = match install_handler(READY_SIGNAL, flags::on_ready) {
            Ok(saved) => saved,
            Err(e) => {
                flags::set_wake_fd(None);
                return Err(e.into());
            }
        };
        let saved_timeout = match install_handler(TIMEOUT_SIGNAL, flags::on_timeout) {
            Ok(saved) => saved,
            Err(e) => {
                restore(READY_SIGNAL, &saved_ready);
                flags::set_wake_fd(None);
                return Err(e.into());
            }
        };

        debug!("installed ready/timeout signal handlers");

        Ok(Self {
            saved_ready,
            saved_timeout,
            wake_rx,
            _wake_tx: wake_tx,
        })
    }

    pub(crate) fn wake_fd(&self) -> BorrowedFd<'_> {
        self.wake_rx.as_fd()
    }

    pub(crate) fn wake_raw_fd(&self) -> RawFd {
        self.wake_rx.as_raw_fd()
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        restore(READY_SIGNAL, &self.saved_ready);
        restore(TIMEOUT_SIGNAL, &self.saved_timeout);
        flags::set_wake_fd(None);
        debug!("restored original signal dispositions");
    }
}

fn install_handler(
    signal: Signal,
    handler: extern "C" fn(libc::c_int),
) -> nix::Result<SigAction> {
    let action = SigAction::new(
        SigHandler::Handler(handler),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: the handler only touches atomics and write(2).
    unsafe { sigaction(signal, &action) }
}

fn restore(signal: Signal, saved: &SigAction) {
    // SAFETY: reinstates a disposition previously returned by sigaction.
    if let Err(e) = unsafe { sigaction(signal, saved) } {
        warn!(signal = ?signal, error = %e, "failed to restore signal disposition");
    }
}
