// src/launcher/attempt.rs

use std::process::Child;
use std::time::{Duration, Instant};

use super::backend::SpawnBackend;
use super::command::ServerCommand;
use super::process::{SupervisedProcess, kill_and_reap};
use crate::errors::{Result, XvfbError};
use crate::types::DisplayId;

/// One spawn-wait-resolve cycle.
///
/// Owns its child until it either becomes a [`SupervisedProcess`] or is
/// discarded; both consume the attempt.
#[derive(Debug)]
pub struct Attempt {
    number: u32,
    display: DisplayId,
    child: Child,
    started: Instant,
}

impl Attempt {
    pub fn spawn<B: SpawnBackend + ?Sized>(
        backend: &mut B,
        command: &ServerCommand,
        number: u32,
    ) -> Result<Self> {
        let started = Instant::now();
        let child = backend.spawn(command).map_err(|source| XvfbError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        Ok(Self {
            number,
            display: command.display,
            child,
            started,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn display(&self) -> DisplayId {
        self.display
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Hand the child over to the caller.
    pub fn into_supervised(self, startup_time: Duration) -> SupervisedProcess {
        SupervisedProcess::new(self.child, self.display, self.number, startup_time)
    }

    /// Kill and reap the child of a failed attempt. A child that already
    /// exited on its own is just reaped.
    pub fn discard(mut self) {
        if self.child.id() > 0 {
            kill_and_reap(&mut self.child);
        }
    }
}
