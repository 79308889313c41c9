//! Blocking command execution with captured output.
//!
//! No timeout is applied: a hung tool hangs the caller.

use std::ffi::OsStr;
use std::process::{Command, Output};

use thiserror::Error;
use tracing::debug;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be spawned (usually not on `PATH`).
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Status {
        program: String,
        status: String,
        stderr: String,
    },

    /// An empty command line was given.
    #[error("Empty command")]
    Empty,
}

/// Run `program args...`, wait for it and capture stdout/stderr.
pub fn run<I, S>(program: &str, args: I) -> Result<Output, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?;
    debug!(program, status = %output.status, "command finished");
    Ok(output)
}

/// Run a command and return its stdout when it exits successfully.
pub fn run_stdout<I, S>(program: &str, args: I) -> Result<String, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = run(program, args)?;
    if !output.status.success() {
        return Err(CommandError::Status {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Like [`run_stdout`], but any failure becomes `None` (logged at debug).
pub fn probe_stdout<I, S>(program: &str, args: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_stdout(program, args)
        .inspect_err(|e| debug!(error = %e, "probe failed"))
        .ok()
}

/// Split a command line on whitespace into program and arguments.
pub fn split_command(command: &str) -> Result<(&str, Vec<&str>), CommandError> {
    let mut parts = command.split_whitespace();
    let program = parts.next().ok_or(CommandError::Empty)?;
    Ok((program, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &str = "definitely_not_a_real_command_12345";

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = run_stdout(MISSING, ["--version"]).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert!(probe_stdout(MISSING, ["--version"]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_captured() {
        let out = run_stdout("echo", ["hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_status_error() {
        let err = run_stdout("false", std::iter::empty::<&str>()).unwrap_err();
        assert!(matches!(err, CommandError::Status { .. }));
    }

    #[test]
    fn test_split_command() {
        let (program, args) = split_command("nvidia-smi  -L").unwrap();
        assert_eq!(program, "nvidia-smi");
        assert_eq!(args, vec!["-L"]);
        assert!(matches!(split_command("   "), Err(CommandError::Empty)));
    }
}
