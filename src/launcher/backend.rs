// src/launcher/backend.rs

//! Pluggable spawn backend.
//!
//! The launcher asks a `SpawnBackend` for each attempt's child instead of
//! spawning directly, so tests can stand in scripted servers while the retry
//! loop and signal handshake stay real.

use std::io;
use std::process::Child;

use super::command::ServerCommand;

pub trait SpawnBackend {
    /// Start the process for one attempt. The child must inherit the ready
    /// signal as ignored, which [`ServerCommand::to_command`] arranges.
    fn spawn(&mut self, command: &ServerCommand) -> io::Result<Child>;
}

/// Spawns the configured display-server binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSpawnBackend;

impl SpawnBackend for RealSpawnBackend {
    fn spawn(&mut self, command: &ServerCommand) -> io::Result<Child> {
        command.to_command().spawn()
    }
}
