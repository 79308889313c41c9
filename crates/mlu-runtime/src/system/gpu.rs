//! NVIDIA driver and toolkit queries.
//!
//! The watermark side only needs raw output (`Option`), the query side
//! parses per-device values and propagates failures.

use mlu_core::gpu::{GpuMap, GpuQueryError, parse_device_lines};

use crate::command::{CommandError, probe_stdout, run_stdout};

const DRIVER_QUERY: [&str; 2] = ["--query-gpu=driver_version", "--format=csv,noheader"];
const MEMORY_QUERY: [&str; 2] = ["--query-gpu=memory.used", "--format=csv,nounits,noheader"];
const NAME_QUERY: [&str; 2] = ["--query-gpu=name", "--format=csv,nounits,noheader"];

/// Raw driver-version output, one line per device.
pub fn driver_version_output(nvidia_smi: &str) -> Option<String> {
    probe_stdout(nvidia_smi, DRIVER_QUERY)
}

/// Raw `nvcc --version` banner.
pub fn nvcc_version_output(nvcc: &str) -> Option<String> {
    probe_stdout(nvcc, ["--version"])
}

/// Per-device GPU queries through `nvidia-smi`.
#[derive(Debug, Clone)]
pub struct GpuQuery {
    nvidia_smi: String,
}

impl Default for GpuQuery {
    fn default() -> Self {
        Self::new("nvidia-smi")
    }
}

impl GpuQuery {
    pub fn new(nvidia_smi: impl Into<String>) -> Self {
        Self {
            nvidia_smi: nvidia_smi.into(),
        }
    }

    /// Memory in use per device, in MiB.
    pub fn memory_map(&self) -> Result<GpuMap<u64>, GpuQueryError> {
        let output = self.query(MEMORY_QUERY)?;
        parse_device_lines(&output)
    }

    /// Product name per device.
    pub fn names_map(&self) -> Result<GpuMap<String>, GpuQueryError> {
        let output = self.query(NAME_QUERY)?;
        parse_device_lines(&output)
    }

    /// Product name of device `n`, `None` if there is no such device.
    pub fn name_by_index(&self, n: usize) -> Result<Option<String>, GpuQueryError> {
        Ok(self.names_map()?.get(n).cloned())
    }

    fn query(&self, args: [&str; 2]) -> Result<String, GpuQueryError> {
        run_stdout(&self.nvidia_smi, args).map_err(|e| match e {
            CommandError::Status {
                program,
                status,
                stderr,
            } => GpuQueryError::Failed {
                tool: program,
                status,
                stderr,
            },
            other => GpuQueryError::Unavailable {
                tool: self.nvidia_smi.clone(),
                reason: other.to_string(),
            },
        })
    }
}
