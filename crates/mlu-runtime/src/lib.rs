//! OS and process adapters for mlu.
//!
//! Implements the ports defined in `mlu-core` by running external tools
//! (`python`, `nvidia-smi`, `nvcc`, `pip`, `git`) and reading files.
#![deny(unused_crate_dependencies)]

pub mod artifact;
pub mod command;
pub mod exec;
pub mod system;

pub use artifact::{ArtifactOutcome, log_text_as_artifact};
pub use command::CommandError;
pub use exec::{ExecOutput, exec, exec_and_print};
pub use system::{DefaultSystemProbe, GpuQuery};
