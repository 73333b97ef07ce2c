// src/launcher/mod.rs

//! The display-server launcher.
//!
//! [`Launcher::launch`] runs the whole lifecycle as one sequential state
//! machine per attempt:
//!
//! ```text
//! SPAWNED -> WAITING -> READY      (terminal success)
//!                    -> TIMED_OUT  -> SPAWNED (next attempt)
//!                                  -> EXHAUSTED (terminal failure)
//! ```
//!
//! - [`command`] builds the server invocation.
//! - [`backend`] provides the `SpawnBackend` seam.
//! - [`attempt`] owns one attempt's child.
//! - [`process`] is the handle returned to the caller.
//! - [`exit_hooks`] terminates surviving servers at process exit.

pub mod attempt;
pub mod backend;
pub mod command;
pub mod exit_hooks;
pub mod process;

pub use attempt::Attempt;
pub use backend::{RealSpawnBackend, SpawnBackend};
pub use command::ServerCommand;
pub use exit_hooks::terminate_registered;
pub use process::SupervisedProcess;

use std::sync::{Mutex, PoisonError};

use rand::Rng;
use tracing::{error, info};

use crate::config::LaunchRequest;
use crate::errors::{Result, XvfbError};
use crate::handshake::{Deadline, Outcome, SignalGuard};
use crate::types::DisplayId;

/// Serializes launches: signal dispositions and the latched flags are
/// process-wide, so at most one attempt may be live at a time.
static LAUNCH_LOCK: Mutex<()> = Mutex::new(());

/// Environment variable published on success.
pub const DISPLAY_ENV: &str = "DISPLAY";

/// Launch the display server with default settings.
///
/// `display` fixes the address for every attempt (`":55"` or `"55"`); when
/// `None` each attempt draws a fresh random display. On success `DISPLAY`
/// is set in this process's environment.
pub fn launch_xvfb(display: Option<&str>, max_tries: u32) -> Result<SupervisedProcess> {
    let display = display
        .map(|d| d.parse::<DisplayId>().map_err(XvfbError::Config))
        .transpose()?;
    let request = LaunchRequest {
        display,
        max_tries,
        ..LaunchRequest::default()
    };
    Launcher::new(request)?.launch()
}

#[derive(Debug)]
pub struct Launcher<B = RealSpawnBackend> {
    request: LaunchRequest,
    backend: B,
}

impl Launcher<RealSpawnBackend> {
    pub fn new(request: LaunchRequest) -> Result<Self> {
        Self::with_backend(request, RealSpawnBackend)
    }
}

impl<B: SpawnBackend> Launcher<B> {
    pub fn with_backend(request: LaunchRequest, backend: B) -> Result<Self> {
        if request.max_tries == 0 {
            return Err(XvfbError::Config("max_tries must be >= 1".to_string()));
        }
        if request.startup_timeout_secs == 0 {
            return Err(XvfbError::Config(
                "startup_timeout_secs must be >= 1".to_string(),
            ));
        }
        Ok(Self { request, backend })
    }

    pub fn request(&self) -> &LaunchRequest {
        &self.request
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Launch, drawing random displays from the thread RNG.
    pub fn launch(&mut self) -> Result<SupervisedProcess> {
        self.launch_with_rng(&mut rand::thread_rng())
    }

    /// Launch, drawing random displays from `rng`.
    ///
    /// Returns [`XvfbError::StartFailed`] once `max_tries` attempts have
    /// timed out. The signal dispositions in place before the call are
    /// restored before returning, whatever the result.
    pub fn launch_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SupervisedProcess> {
        let _serial = LAUNCH_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let guard = SignalGuard::install()?;

        for number in 1..=self.request.max_tries {
            let display_id = self.request.display.unwrap_or_else(|| DisplayId::random(rng));
            let command = ServerCommand::xvfb(&self.request, display_id);
            let attempt = Attempt::spawn(&mut self.backend, &command, number)?;

            let waited = {
                let _deadline = Deadline::arm(self.request.startup_timeout_secs);
                guard.wait_for_outcome()
            };
            let outcome = match waited {
                Ok(outcome) => outcome,
                Err(e) => {
                    attempt.discard();
                    return Err(e);
                }
            };
            let elapsed = attempt.elapsed();
            let server_display = attempt.display();
            let attempt_number = attempt.number();

            match outcome {
                Outcome::Ready => {
                    let pid = attempt.pid();
                    let process = attempt.into_supervised(elapsed);
                    exit_hooks::register(&process);
                    publish_display(server_display);
                    info!(
                        pid,
                        display = %server_display,
                        attempt = attempt_number,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "started Xvfb pid {} in {:.4}s",
                        pid,
                        elapsed.as_secs_f64()
                    );
                    return Ok(process);
                }
                Outcome::TimedOut => {
                    attempt.discard();
                    crate::handshake::flags::reset();
                    error!(
                        display = %server_display,
                        attempt = attempt_number,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "failed to start Xvfb, killed after waiting {:.4}s",
                        elapsed.as_secs_f64()
                    );
                }
            }
        }

        let attempts = self.request.max_tries;
        error!(critical = true, attempts, "giving up on Xvfb after {} attempts", attempts);
        Err(XvfbError::StartFailed { attempts })
    }
}

fn publish_display(display_id: DisplayId) {
    // SAFETY: mutation is serialized with other launches by LAUNCH_LOCK.
    // Hosts that read the environment from other threads while launching
    // must synchronize with the launch themselves.
    unsafe { std::env::set_var(DISPLAY_ENV, display_id.address()) };
}
