//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core and runtime errors to exit codes.

use mlu_core::{GpuQueryError, SettingsError};
use mlu_runtime::CommandError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error not caught by the parser.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Input file content is not what the command expects.
    #[error("Invalid input: {0}")]
    Data(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external tool is missing.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Process execution error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Data(_) => 65,        // EX_DATAERR
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Process(_) => 71,     // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<GpuQueryError> for CliError {
    fn from(err: GpuQueryError) -> Self {
        match err {
            GpuQueryError::Unavailable { .. } => Self::Unavailable(err.to_string()),
            GpuQueryError::Failed { .. } | GpuQueryError::Parse { .. } => {
                Self::Process(err.to_string())
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Empty => Self::Arguments(err.to_string()),
            CommandError::Spawn { .. } => Self::Unavailable(err.to_string()),
            CommandError::Status { .. } => Self::Process(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
