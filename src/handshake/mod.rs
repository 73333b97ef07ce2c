// src/handshake/mod.rs

//! Signal-based readiness handshake with the display server.
//!
//! The server's only way to say "ready" is to send `SIGUSR1` to its parent,
//! and it only does so if it inherited `SIGUSR1` as ignored. The pieces:
//!
//! - [`flags`]: the two latched flags and the handlers that set them.
//! - [`disposition`]: [`SignalGuard`], which saves the current dispositions,
//!   installs the handlers and restores the originals on drop.
//! - [`alarm`]: [`Deadline`], a one-shot `SIGALRM` disarmed on drop.
//! - [`wait`]: the blocking wait, a self-pipe fed by the handlers.
//!
//! Because the flags latch, a ready signal that lands between spawn and
//! arming the deadline is still observed by the first check of the wait.

pub mod alarm;
pub mod disposition;
pub mod flags;
pub mod wait;

pub use alarm::Deadline;
pub use disposition::{READY_SIGNAL, SignalGuard, TIMEOUT_SIGNAL};

/// Unit tests that touch the latched flags or dispositions take this.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// How a single attempt's wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ready,
    TimedOut,
}
