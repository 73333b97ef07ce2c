// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tempfile::NamedTempFile;

use xvfb_launch::cli::CliArgs;
use xvfb_launch::config::{LaunchRequest, load_and_validate, parse_str};
use xvfb_launch::errors::XvfbError;
use xvfb_launch::{DisplayId, build_request};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_is_loaded() {
    let file = config_file(
        r#"
[xvfb]
binary = "/usr/bin/Xvfb"
screen = "1280x1024x24"
display = ":99"
max_tries = 5
startup_timeout_secs = 4
"#,
    );

    let request = load_and_validate(file.path()).unwrap();

    assert_eq!(
        request,
        LaunchRequest {
            binary: PathBuf::from("/usr/bin/Xvfb"),
            screen: "1280x1024x24".to_string(),
            display: Some(DisplayId::new(99)),
            max_tries: 5,
            startup_timeout_secs: 4,
        }
    );
}

#[test]
fn empty_config_uses_defaults() {
    let file = config_file("");
    assert_eq!(load_and_validate(file.path()).unwrap(), LaunchRequest::default());
}

#[test]
fn unknown_key_is_a_toml_error() {
    let result = parse_str("[xvfb]\nretries = 3\n");
    assert!(matches!(result, Err(XvfbError::Toml(_))));
}

#[test]
fn zero_max_tries_returns_config_error() {
    let file = config_file("[xvfb]\nmax_tries = 0\n");

    match load_and_validate(file.path()) {
        Err(XvfbError::Config(msg)) => assert!(msg.contains("max_tries")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/nonexistent/XvfbLaunch.toml");
    assert!(matches!(result, Err(XvfbError::Io(_))));
}

#[test]
fn cli_flags_override_config_file() {
    let file = config_file("[xvfb]\ndisplay = \":10\"\nmax_tries = 2\n");
    let path = file.path().to_str().unwrap();

    let args = CliArgs::try_parse_from([
        "xvfb-launch",
        "--config",
        path,
        "--display",
        ":77",
        "--timeout",
        "3",
        "--",
        "xdpyinfo",
        "-display",
        ":77",
    ])
    .unwrap();
    let request = build_request(&args).unwrap();

    assert_eq!(request.display, Some(DisplayId::new(77)));
    assert_eq!(request.max_tries, 2);
    assert_eq!(request.startup_timeout_secs, 3);
    assert_eq!(args.command, vec!["xdpyinfo", "-display", ":77"]);
}

#[test]
fn invalid_cli_override_is_rejected() {
    let file = config_file("");
    let path = file.path().to_str().unwrap();

    let args =
        CliArgs::try_parse_from(["xvfb-launch", "--config", path, "--screen", "big"]).unwrap();

    assert!(matches!(build_request(&args), Err(XvfbError::Config(_))));
}

#[test]
fn config_in_working_directory_is_ignored_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("XvfbLaunch.toml"),
        "[xvfb]\nmax_tries = 9\ndisplay = \":42\"\n",
    )
    .unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let args = CliArgs::try_parse_from(["xvfb-launch"]).unwrap();
    let request = build_request(&args);

    std::env::set_current_dir(previous).unwrap();
    assert_eq!(request.unwrap(), LaunchRequest::default());
}
