//! Core domain for mlu: watermark facts and their parsers, GPU query
//! results, config flattening, sparse voxel helpers, settings and the
//! ports the runtime implements.
#![deny(unused_crate_dependencies)]

pub mod facts;
pub mod flatten;
pub mod gpu;
pub mod ports;
pub mod services;
pub mod settings;
pub mod sparse;

// Re-export commonly used types for convenience
pub use facts::{Builtin, DEFAULT_FACTS, FactId, FactPlan, FactReport, FactRequest};
pub use flatten::{DEFAULT_SEPARATOR, flatten};
pub use gpu::{GpuMap, GpuQueryError, parse_device_lines};
pub use ports::{ArtifactTracker, SystemProbePort, TrackerError};
pub use services::{Watermark, WatermarkService};
pub use settings::{Settings, SettingsError, validate_settings};
pub use sparse::{DEFAULT_FILL, ExampleTensors, SparseError, sparse_to_dense, split_coords_features};
