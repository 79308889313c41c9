//! Port definitions (trait abstractions) for external systems.
//!
//! Ports describe what the core expects from infrastructure: process
//! environment, vendor CLIs, the package manager and experiment trackers.
//! They carry no process or filesystem implementation details.
//!
//! # Design Rules
//!
//! - Probe methods return `Option`; a `None` is a degraded fact, never an error
//! - Raw tool output crosses the port; parsing stays in core

pub mod artifact_tracker;
pub mod system_probe;

pub use artifact_tracker::{ArtifactTracker, TrackerError};
pub use system_probe::SystemProbePort;
