// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::DisplayId;

pub const DEFAULT_BINARY: &str = "Xvfb";
pub const DEFAULT_SCREEN: &str = "1024x768x24+32";
pub const DEFAULT_MAX_TRIES: u32 = 3;
pub const DEFAULT_STARTUP_TIMEOUT_SECS: u32 = 2;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [xvfb]
/// binary = "Xvfb"
/// screen = "1024x768x24+32"
/// display = ":55"
/// max_tries = 3
/// startup_timeout_secs = 2
/// ```
///
/// Every key is optional. This is the unchecked form; convert it into a
/// [`LaunchRequest`] with `LaunchRequest::try_from`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub xvfb: XvfbSection,
}

/// `[xvfb]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XvfbSection {
    /// Display-server executable, looked up on `PATH` if not absolute.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Screen geometry handed to `-screen 0`.
    #[serde(default = "default_screen")]
    pub screen: String,

    /// Fixed display address. When absent every attempt draws a new one.
    #[serde(default)]
    pub display: Option<String>,

    #[serde(default = "default_max_tries")]
    pub max_tries: u32,

    /// Seconds to wait for the ready signal on each attempt.
    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u32,
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

fn default_screen() -> String {
    DEFAULT_SCREEN.to_string()
}

fn default_max_tries() -> u32 {
    DEFAULT_MAX_TRIES
}

fn default_startup_timeout_secs() -> u32 {
    DEFAULT_STARTUP_TIMEOUT_SECS
}

impl Default for XvfbSection {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            screen: default_screen(),
            display: None,
            max_tries: default_max_tries(),
            startup_timeout_secs: default_startup_timeout_secs(),
        }
    }
}

/// Validated launch configuration. Immutable for the duration of a launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub binary: PathBuf,
    pub screen: String,
    pub display: Option<DisplayId>,
    pub max_tries: u32,
    pub startup_timeout_secs: u32,
}

impl Default for LaunchRequest {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            screen: DEFAULT_SCREEN.to_string(),
            display: None,
            max_tries: DEFAULT_MAX_TRIES,
            startup_timeout_secs: DEFAULT_STARTUP_TIMEOUT_SECS,
        }
    }
}
