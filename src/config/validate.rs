// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{LaunchRequest, RawConfigFile, XvfbSection};
use crate::errors::{Result, XvfbError};
use crate::types::DisplayId;

impl TryFrom<RawConfigFile> for LaunchRequest {
    type Error = XvfbError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        LaunchRequest::try_from(raw.xvfb)
    }
}

impl TryFrom<XvfbSection> for LaunchRequest {
    type Error = XvfbError;

    fn try_from(section: XvfbSection) -> std::result::Result<Self, Self::Error> {
        validate_binary(&section.binary)?;
        validate_screen(&section.screen)?;
        validate_limits(&section)?;

        let display = section
            .display
            .as_deref()
            .map(|s| s.parse::<DisplayId>().map_err(XvfbError::Config))
            .transpose()?;

        Ok(LaunchRequest {
            binary: PathBuf::from(section.binary),
            screen: section.screen,
            display,
            max_tries: section.max_tries,
            startup_timeout_secs: section.startup_timeout_secs,
        })
    }
}

fn validate_binary(binary: &str) -> Result<()> {
    if binary.trim().is_empty() {
        return Err(XvfbError::Config(
            "[xvfb].binary must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_limits(section: &XvfbSection) -> Result<()> {
    if section.max_tries == 0 {
        return Err(XvfbError::Config(
            "[xvfb].max_tries must be >= 1 (got 0)".to_string(),
        ));
    }
    // alarm(2) treats 0 as "cancel", so a zero deadline would never fire.
    if section.startup_timeout_secs == 0 {
        return Err(XvfbError::Config(
            "[xvfb].startup_timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// Accepts `WxHxD` with an optional `+bpp` suffix, e.g. `1024x768x24+32`.
fn validate_screen(screen: &str) -> Result<()> {
    let invalid = || {
        XvfbError::Config(format!(
            "[xvfb].screen '{screen}' is not of the form WxHxD or WxHxD+bpp"
        ))
    };

    let (geometry, bpp) = match screen.split_once('+') {
        Some((geometry, bpp)) => (geometry, Some(bpp)),
        None => (screen, None),
    };

    let parts: Vec<&str> = geometry.split('x').collect();
    if parts.len() != 3 || !parts.iter().all(|p| is_number(p)) {
        return Err(invalid());
    }
    if let Some(bpp) = bpp {
        if !is_number(bpp) {
            return Err(invalid());
        }
    }
    Ok(())
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> XvfbSection {
        XvfbSection::default()
    }

    #[test]
    fn defaults_validate() {
        let request = LaunchRequest::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(request, LaunchRequest::default());
    }

    #[test]
    fn zero_max_tries_is_rejected() {
        let raw = XvfbSection {
            max_tries: 0,
            ..section()
        };
        match LaunchRequest::try_from(raw) {
            Err(XvfbError::Config(msg)) => assert!(msg.contains("max_tries")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let raw = XvfbSection {
            startup_timeout_secs: 0,
            ..section()
        };
        assert!(matches!(
            LaunchRequest::try_from(raw),
            Err(XvfbError::Config(_))
        ));
    }

    #[test]
    fn screen_forms() {
        for ok in ["1024x768x24", "1024x768x24+32", "640x480x8"] {
            assert!(validate_screen(ok).is_ok(), "rejected {ok}");
        }
        for bad in ["", "1024x768", "1024x768x24+", "axbxc", "1024x768x24x8"] {
            assert!(validate_screen(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn fixed_display_is_parsed() {
        let raw = XvfbSection {
            display: Some(":55".to_string()),
            ..section()
        };
        let request = LaunchRequest::try_from(raw).unwrap();
        assert_eq!(request.display, Some(DisplayId::new(55)));
    }

    #[test]
    fn bad_display_is_a_config_error() {
        let raw = XvfbSection {
            display: Some("host:1".to_string()),
            ..section()
        };
        assert!(matches!(
            LaunchRequest::try_from(raw),
            Err(XvfbError::Config(_))
        ));
    }
}
