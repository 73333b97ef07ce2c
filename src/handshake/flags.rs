// src/handshake/flags.rs

//! Latched flags set from signal context.
//!
//! The two handlers here only store into an atomic and write one byte to the
//! wake pipe. Both are async-signal-safe; nothing else may run inside them.

use std::os::fd::{BorrowedFd, RawFd};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use libc::c_int;

use super::Outcome;

static READY: AtomicBool = AtomicBool::new(false);
static TIMED_OUT: AtomicBool = AtomicBool::new(false);

/// Write end of the wake pipe, or -1 while no launch is in progress.
static WAKE_FD: AtomicI32 = AtomicI32::new(-1);

pub(crate) extern "C" fn on_ready(_signum: c_int) {
    READY.store(true, Ordering::SeqCst);
    wake();
}

pub(crate) extern "C" fn on_timeout(_signum: c_int) {
    TIMED_OUT.store(true, Ordering::SeqCst);
    wake();
}

fn wake() {
    let fd = WAKE_FD.load(Ordering::SeqCst);
    if fd >= 0 {
        // SAFETY: the fd stays open until `set_wake_fd(None)` runs, which
        // happens only after both handlers have been uninstalled.
        let fd = unsafe { BorrowedFd::borrow_raw(fd) };
        // A full pipe already guarantees a wake-up.
        let _ = nix::unistd::write(fd, &[1u8]);
    }
}

pub(crate) fn set_wake_fd(fd: Option<RawFd>) {
    WAKE_FD.store(fd.unwrap_or(-1), Ordering::SeqCst);
}

/// Clear both flags so the next attempt starts from a clean slate.
pub fn reset() {
    READY.store(false, Ordering::SeqCst);
    TIMED_OUT.store(false, Ordering::SeqCst);
}

/// The outcome latched so far, if any. Ready takes precedence over a
/// deadline that fired in the same window.
pub fn observed() -> Option<Outcome> {
    if READY.load(Ordering::SeqCst) {
        Some(Outcome::Ready)
    } else if TIMED_OUT.load(Ordering::SeqCst) {
        Some(Outcome::TimedOut)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Handlers are called directly here; no signal is ever raised.
    #[test]
    fn flags_latch_and_reset() {
        let _lock = crate::handshake::TEST_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        reset();
        assert_eq!(observed(), None);

        on_timeout(libc::SIGALRM);
        assert_eq!(observed(), Some(Outcome::TimedOut));

        on_ready(libc::SIGUSR1);
        assert_eq!(observed(), Some(Outcome::Ready), "ready wins over timeout");

        reset();
        assert_eq!(observed(), None);
    }
}
