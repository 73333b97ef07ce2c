// src/handshake/alarm.rs

use nix::unistd::alarm;
use tracing::{debug, warn};

/// One-shot deadline that raises the timeout signal after `secs` seconds.
///
/// Disarmed when dropped, so no alarm outlives the attempt that armed it.
#[derive(Debug)]
pub struct Deadline(());

impl Deadline {
    /// Arm the process alarm. `secs` must be at least 1.
    pub fn arm(secs: u32) -> Self {
        if let Some(remaining) = alarm::set(secs) {
            warn!(remaining, "replaced a pending alarm");
        }
        debug!(secs, "armed startup deadline");
        Deadline(())
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        alarm::cancel();
    }
}
