//! Experiment tracker port.

use std::path::Path;

use thiserror::Error;

/// Errors a tracker reports when it cannot take an artifact.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker refused or failed to store the file.
    #[error("Failed to log artifact {path}: {reason}")]
    LogFailed { path: String, reason: String },

    /// The tracker is not connected to a run.
    #[error("Tracker has no active run")]
    NoActiveRun,
}

/// Anything that can attach a local file to an experiment run.
pub trait ArtifactTracker {
    /// Human-readable name used in warnings.
    fn name(&self) -> &str;

    /// Upload `path`, optionally under `destination` inside the run.
    fn log_artifact(&self, path: &Path, destination: Option<&str>) -> Result<(), TrackerError>;
}
