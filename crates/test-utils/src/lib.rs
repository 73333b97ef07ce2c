pub mod builders;
pub mod scripted_backend;

use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, kill, sigaction};
use nix::unistd::Pid;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();
static SIGNAL_LOCK: Mutex<()> = Mutex::new(());

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Serialize tests that touch signal dispositions, alarms or `DISPLAY`.
///
/// Those are process-wide, and tests in one binary run on parallel threads.
pub fn signal_lock() -> MutexGuard<'static, ()> {
    SIGNAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read the current disposition of `signal` without changing it.
pub fn current_action(signal: Signal) -> SigAction {
    let query = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    let current = unsafe { sigaction(signal, &query) }.expect("query signal disposition");
    unsafe { sigaction(signal, &current) }.expect("restore signal disposition");
    current
}

pub fn current_handler(signal: Signal) -> SigHandler {
    current_action(signal).handler()
}

/// Install `handler` for `signal` and return the previous action.
pub fn set_handler(signal: Signal, handler: SigHandler) -> SigAction {
    let action = SigAction::new(handler, SaFlags::SA_RESTART, SigSet::empty());
    install_action(signal, &action)
}

/// Install a complete action (handler, flags and mask) and return the
/// previous one.
pub fn install_action(signal: Signal, action: &SigAction) -> SigAction {
    unsafe { sigaction(signal, action) }.expect("install signal action")
}

/// Whether two actions block the same set of signals while running.
pub fn same_mask(a: &SigAction, b: &SigAction) -> bool {
    let (a, b) = (a.mask(), b.mask());
    Signal::iterator().all(|sig| a.contains(sig) == b.contains(sig))
}

/// Whether a process with this pid still exists (zombies included).
pub fn pid_alive(pid: u32) -> bool {
    kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Put back an action returned by [`set_handler`].
pub fn restore_action(signal: Signal, action: &SigAction) {
    unsafe { sigaction(signal, action) }.expect("restore signal action");
}

/// Handler that does nothing; stands in for a host's own handler.
pub extern "C" fn noop_handler(_signum: i32) {}
