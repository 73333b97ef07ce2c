// src/launcher/exit_hooks.rs

//! Best-effort termination of launched servers at normal process exit.
//!
//! The registry holds only `Weak` references: a server whose handle was
//! already dropped has been terminated by that drop and is skipped. The
//! hook runs from `atexit`, so it covers `std::process::exit` and a normal
//! return from `main`, never a crash or a fatal signal.

use std::process::Child;
use std::sync::{Arc, Mutex, Once, Weak};

use tracing::warn;

use super::process::{SharedChild, SupervisedProcess, kill_and_reap};

static REGISTRY: Mutex<Vec<Weak<Mutex<Option<Child>>>>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

/// Register `process` for termination at exit. Installs the `atexit` hook
/// on first use.
pub(crate) fn register(process: &SupervisedProcess) {
    INSTALL.call_once(|| {
        // SAFETY: `run_at_exit` never unwinds and only uses try_lock.
        if unsafe { libc::atexit(run_at_exit) } != 0 {
            warn!("could not register exit hook; servers may outlive this process");
        }
    });

    let mut registry = match REGISTRY.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    registry.retain(|weak| weak.strong_count() > 0);
    registry.push(Arc::downgrade(process.shared()));
}

/// Kill and reap every registered server whose handle is still alive.
///
/// Returns how many servers were terminated. Never blocks: if the registry
/// is locked elsewhere nothing happens, and a child slot locked elsewhere
/// stays registered for a later call.
pub fn terminate_registered() -> usize {
    let Ok(mut registry) = REGISTRY.try_lock() else {
        return 0;
    };

    let mut terminated = 0;
    registry.retain(|weak| {
        let Some(slot) = weak.upgrade() else {
            return false;
        };
        match terminate_slot(&slot) {
            SlotState::Terminated => {
                terminated += 1;
                false
            }
            SlotState::Empty => false,
            SlotState::Busy => true,
        }
    });
    terminated
}

enum SlotState {
    Terminated,
    Empty,
    Busy,
}

fn terminate_slot(slot: &SharedChild) -> SlotState {
    let Ok(mut guard) = slot.try_lock() else {
        return SlotState::Busy;
    };
    match guard.take() {
        Some(mut child) => {
            kill_and_reap(&mut child);
            SlotState::Terminated
        }
        None => SlotState::Empty,
    }
}

extern "C" fn run_at_exit() {
    terminate_registered();
}

#[cfg(test)]
mod tests {
    use std::process::Command;
    use std::time::Duration;

    use super::*;
    use crate::types::DisplayId;

    #[test]
    fn busy_slot_stays_registered_until_a_later_pass() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let process = SupervisedProcess::new(child, DisplayId::new(42), 1, Duration::ZERO);
        register(&process);

        {
            let _held = process.shared().lock().unwrap();
            assert_eq!(terminate_registered(), 0);
        }

        assert!(process.is_running());
        assert_eq!(terminate_registered(), 1);
        assert!(!process.is_running());
    }
}
