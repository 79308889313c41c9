//! Run a shell-like command line and echo what it printed.

use std::io::{self, Write};

use tracing::debug;

use crate::command::{CommandError, run, split_command};

/// Captured result of [`exec_and_print`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Split `command` on whitespace, run it and print its stdout, then its
/// stderr when non-empty.
///
/// A non-zero exit is not an error; check [`ExecOutput::success`].
pub fn exec_and_print(command: &str) -> Result<ExecOutput, CommandError> {
    let output = exec(command)?;
    if let Err(e) = echo(&mut io::stdout().lock(), &output) {
        debug!(error = %e, "cannot echo command output");
    }
    Ok(output)
}

fn echo<W: Write>(out: &mut W, output: &ExecOutput) -> io::Result<()> {
    out.write_all(output.stdout.as_bytes())?;
    if !output.stderr.is_empty() {
        out.write_all(output.stderr.as_bytes())?;
    }
    out.flush()
}

/// Same as [`exec_and_print`] without the echo.
pub fn exec(command: &str) -> Result<ExecOutput, CommandError> {
    let (program, args) = split_command(command)?;
    debug!(program, ?args, "exec");
    let output = run(program, &args)?;
    Ok(ExecOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}
