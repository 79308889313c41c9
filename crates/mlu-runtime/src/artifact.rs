//! Attach text blobs (watermarks, configs) to experiment runs.
//!
//! Trackers only accept files, so the text goes through a temporary file
//! that is removed once the tracker returns. Nothing here fails the
//! caller: problems end up as warnings.

use std::io::Write;

use mlu_core::ports::ArtifactTracker;
use tempfile::Builder;
use tracing::{debug, warn};

/// What happened to a text artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    Logged,
    /// The temporary file could not be written.
    TempFileFailed(String),
    /// The tracker refused the file.
    TrackerFailed(String),
}

impl ArtifactOutcome {
    pub const fn is_logged(&self) -> bool {
        matches!(self, Self::Logged)
    }
}

/// Write `text` to a temporary `.txt` file and hand it to `tracker`.
pub fn log_text_as_artifact(
    tracker: &dyn ArtifactTracker,
    text: &str,
    destination: Option<&str>,
) -> ArtifactOutcome {
    let mut file = match Builder::new().prefix("mlu-").suffix(".txt").tempfile() {
        Ok(file) => file,
        Err(e) => {
            warn!(tracker = tracker.name(), error = %e, "cannot create artifact file");
            return ArtifactOutcome::TempFileFailed(e.to_string());
        }
    };
    if let Err(e) = file.write_all(text.as_bytes()).and_then(|()| file.flush()) {
        warn!(tracker = tracker.name(), error = %e, "cannot write artifact file");
        return ArtifactOutcome::TempFileFailed(e.to_string());
    }

    match tracker.log_artifact(file.path(), destination) {
        Ok(()) => {
            debug!(tracker = tracker.name(), path = %file.path().display(), "artifact logged");
            ArtifactOutcome::Logged
        }
        Err(e) => {
            warn!(tracker = tracker.name(), error = %e, "artifact was not logged");
            ArtifactOutcome::TrackerFailed(e.to_string())
        }
    }
}
