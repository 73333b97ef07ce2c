// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{LaunchRequest, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file and return the unchecked `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] to get
/// a [`LaunchRequest`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

pub fn parse_str(contents: &str) -> Result<RawConfigFile> {
    let config: RawConfigFile = toml::from_str(contents)?;
    Ok(config)
}

/// Load a configuration file and validate it into a [`LaunchRequest`].
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<LaunchRequest> {
    let raw = load_from_path(path)?;
    LaunchRequest::try_from(raw)
}
