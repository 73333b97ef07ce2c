// src/handshake/wait.rs

use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use tracing::trace;

use super::disposition::SignalGuard;
use super::{Outcome, flags};
use crate::errors::Result;

impl SignalGuard {
    /// Block until the ready or timeout flag is latched.
    ///
    /// Sleeps in `poll(2)` on the wake pipe with no timeout and re-checks the
    /// flags on every return. Unrelated signals interrupt the poll with
    /// `EINTR` and simply loop; they never end the wait.
    pub fn wait_for_outcome(&self) -> Result<Outcome> {
        loop {
            if let Some(outcome) = flags::observed() {
                return Ok(outcome);
            }

            let mut fds = [PollFd::new(self.wake_fd(), PollFlags::POLLIN)];
            match poll(&mut fds, PollTimeout::NONE) {
                Ok(_) => self.drain_wake_pipe(),
                Err(Errno::EINTR) => trace!("wait interrupted by unrelated signal"),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn drain_wake_pipe(&self) {
        let mut buf = [0u8; 64];
        loop {
            match nix::unistd::read(self.wake_raw_fd(), &mut buf) {
                Ok(n) if n == buf.len() => continue,
                Err(Errno::EINTR) => continue,
                _ => break,
            }
        }
    }
}
