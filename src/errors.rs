// src/errors.rs

//! Crate-wide error type.
//!
//! Only [`XvfbError::StartFailed`] describes the launcher giving up on the
//! display server. The remaining variants cover configuration, spawning and
//! the OS calls behind the signal handshake.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XvfbError {
    #[error("Xvfb failed to start after {attempts} attempts")]
    StartFailed { attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to spawn display server {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("signal handling error: {0}")]
    Signal(#[from] nix::errno::Errno),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, XvfbError>;
