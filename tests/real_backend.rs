// tests/real_backend.rs

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use nix::sys::signal::{SigHandler, Signal};

use xvfb_launch::{Launcher, XvfbError, launch_xvfb};
use xvfb_launch_test_utils::builders::LaunchRequestBuilder;
use xvfb_launch_test_utils::{current_action, init_tracing, signal_lock};

type TestResult = Result<(), Box<dyn Error>>;

/// Write an executable stand-in for Xvfb that records its argv, one
/// argument per line, then signals its parent and stays up.
fn fake_xvfb(dir: &Path) -> Result<(PathBuf, PathBuf), Box<dyn Error>> {
    let args_file = dir.join("argv");
    let script = dir.join("Xvfb");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nkill -USR1 $PPID\nexec sleep 30\n",
            args_file.display()
        ),
    )?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    Ok((script, args_file))
}

#[test]
fn real_backend_passes_server_flags_and_display_last() -> TestResult {
    let _lock = signal_lock();
    init_tracing();

    let dir = tempfile::tempdir()?;
    let (script, args_file) = fake_xvfb(dir.path())?;
    let request = LaunchRequestBuilder::new()
        .binary(script.to_str().ok_or("non-utf8 temp path")?)
        .display(":55")
        .build();

    let process = Launcher::new(request)?.launch()?;

    let argv = fs::read_to_string(&args_file)?;
    let argv: Vec<&str> = argv.lines().collect();
    assert_eq!(
        argv,
        vec!["-once", "-terminate", "-screen", "0", "1024x768x24+32", ":55"]
    );
    assert_eq!(process.display().address(), ":55");
    assert_eq!(std::env::var("DISPLAY")?, ":55");
    Ok(())
}

#[test]
fn missing_binary_fails_without_retrying_and_restores_signals() {
    let _lock = signal_lock();
    init_tracing();

    let request = LaunchRequestBuilder::new()
        .binary("/nonexistent/bin/Xvfb")
        .max_tries(3)
        .build();

    let result = Launcher::new(request).and_then(|mut launcher| launcher.launch());

    match result {
        Err(XvfbError::Spawn { program, .. }) => {
            assert_eq!(program, PathBuf::from("/nonexistent/bin/Xvfb"));
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
    assert_eq!(current_action(Signal::SIGUSR1).handler(), SigHandler::SigDfl);
    assert_eq!(current_action(Signal::SIGALRM).handler(), SigHandler::SigDfl);
}

#[test]
fn launch_xvfb_rejects_bad_arguments_up_front() {
    assert!(matches!(
        launch_xvfb(Some("remote:1"), 3),
        Err(XvfbError::Config(_))
    ));
    assert!(matches!(launch_xvfb(None, 0), Err(XvfbError::Config(_))));
}
