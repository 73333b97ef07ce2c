#![allow(dead_code)]

use xvfb_launch::config::{LaunchRequest, RawConfigFile, XvfbSection};

/// Builder for `LaunchRequest` to simplify test setup.
///
/// Starts from the defaults with a 1 second startup deadline, the shortest
/// `alarm(2)` allows, so failing attempts stay quick.
pub struct LaunchRequestBuilder {
    section: XvfbSection,
}

impl LaunchRequestBuilder {
    pub fn new() -> Self {
        Self {
            section: XvfbSection {
                startup_timeout_secs: 1,
                ..XvfbSection::default()
            },
        }
    }

    pub fn display(mut self, display: &str) -> Self {
        self.section.display = Some(display.to_string());
        self
    }

    pub fn max_tries(mut self, max_tries: u32) -> Self {
        self.section.max_tries = max_tries;
        self
    }

    pub fn startup_timeout_secs(mut self, secs: u32) -> Self {
        self.section.startup_timeout_secs = secs;
        self
    }

    pub fn binary(mut self, binary: &str) -> Self {
        self.section.binary = binary.to_string();
        self
    }

    pub fn screen(mut self, screen: &str) -> Self {
        self.section.screen = screen.to_string();
        self
    }

    pub fn build(self) -> LaunchRequest {
        LaunchRequest::try_from(RawConfigFile { xvfb: self.section })
            .expect("Failed to build valid launch request from builder")
    }
}

impl Default for LaunchRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
