//! Exec command handler.

use anyhow::Result;
use mlu_runtime::exec_and_print;
use tracing::debug;

use crate::error::CliError;

/// Run the command, echo its output and fail if it exited unsuccessfully.
pub fn execute(command: &[String]) -> Result<()> {
    let line = command.join(" ");
    let output = exec_and_print(&line).map_err(CliError::from)?;
    if !output.success {
        debug!(command = %line, "command exited unsuccessfully");
        return Err(CliError::Process(format!("`{line}` exited unsuccessfully")).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let err = execute(&["definitely_not_a_real_command_12345".to_string()]).unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli.exit_code(), 69);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_process_error() {
        let err = execute(&["false".to_string()]).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::Process(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command() {
        assert!(execute(&["true".to_string()]).is_ok());
    }
}
