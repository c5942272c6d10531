//! External command invocation
//!
//! Runs collaborator commands to completion, capturing both output streams.
//! The provisioning tool is a black box, so the captured streams are the
//! only diagnostic surface a failed invocation has; they travel inside the
//! error value. No retries and no harness-side timeout: an invocation that
//! never returns blocks the scenario.

use std::ffi::OsStr;
use std::process::{Command, ExitStatus};

use crate::common::{Error, Result};

/// Captured result of a completed invocation
#[derive(Debug)]
pub struct Invocation {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Run a command to completion, capturing stdout and stderr
///
/// Fails only if the command could not be launched; a non-zero exit is
/// reported through the returned [`Invocation`].
pub fn run(program: impl AsRef<OsStr>, args: &[&str]) -> Result<Invocation> {
    let rendered = render(&program, args);
    tracing::debug!(command = %rendered, "invoking");

    let output = Command::new(&program)
        .args(args)
        .output()
        .map_err(|e| Error::Launch {
            command: rendered,
            source: e,
        })?;

    Ok(Invocation {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status,
    })
}

/// Run a command and treat any non-zero exit as an invocation failure
pub fn run_checked(program: impl AsRef<OsStr>, args: &[&str]) -> Result<Invocation> {
    let invocation = run(&program, args)?;
    if !invocation.success() {
        return Err(Error::Invocation {
            command: render(&program, args),
            status: invocation.status,
            stdout: invocation.stdout,
            stderr: invocation.stderr,
        });
    }
    Ok(invocation)
}

fn render(program: &impl AsRef<OsStr>, args: &[&str]) -> String {
    let mut rendered = program.as_ref().to_string_lossy().into_owned();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_both_streams() {
        let invocation =
            run("sh", &["-c", "echo to-stdout; echo to-stderr >&2"]).unwrap();
        assert!(invocation.success());
        assert_eq!(invocation.stdout, "to-stdout\n");
        assert_eq!(invocation.stderr, "to-stderr\n");
    }

    #[test]
    fn nonzero_exit_is_not_a_launch_failure() {
        let invocation = run("sh", &["-c", "exit 3"]).unwrap();
        assert!(!invocation.success());
        assert_eq!(invocation.status.code(), Some(3));
    }

    #[test]
    fn run_checked_surfaces_streams_on_failure() {
        let err =
            run_checked("sh", &["-c", "echo progress; echo broken >&2; exit 1"]).unwrap_err();
        match err {
            Error::Invocation {
                stdout, stderr, ..
            } => {
                assert_eq!(stdout, "progress\n");
                assert_eq!(stderr, "broken\n");
            }
            other => panic!("expected Invocation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_a_launch_failure() {
        let err = run("/nonexistent/cloudinit-verify-tool", &[]).unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }
}
