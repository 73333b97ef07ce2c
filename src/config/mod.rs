// src/config/mod.rs

//! Launch configuration.
//!
//! - [`model`] holds the serde model of `XvfbLaunch.toml` and the validated
//!   [`LaunchRequest`].
//! - [`loader`] reads and parses files.
//! - [`validate`] turns the raw model into a `LaunchRequest`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{LaunchRequest, RawConfigFile, XvfbSection};
