//! System probe implementation for mlu-runtime.
//!
//! This module provides the `DefaultSystemProbe` which implements
//! `SystemProbePort` from mlu-core. It performs active system probing
//! via environment lookups, command execution and header reads.

mod gpu;
mod python;

use std::fs;
use std::path::Path;

use mlu_core::ports::SystemProbePort;
use mlu_core::settings::Settings;
use sysinfo::System;
use tracing::debug;

pub use gpu::{GpuQuery, driver_version_output, nvcc_version_output};
pub use python::{installed_packages, vcs_head, version_line};

/// Default implementation of `SystemProbePort`.
///
/// Constructed in the CLI's main.rs from the loaded settings and passed
/// to the watermark service.
///
/// # Example
///
/// ```ignore
/// use mlu_runtime::system::DefaultSystemProbe;
/// use mlu_core::ports::SystemProbePort;
///
/// let probe = DefaultSystemProbe::new(&Settings::with_defaults());
/// let host = probe.hostname();
/// ```
#[derive(Debug, Clone)]
pub struct DefaultSystemProbe {
    python_interpreters: Vec<String>,
    package_list_command: Vec<String>,
    nvidia_smi: String,
    nvcc: String,
    git: String,
}

impl DefaultSystemProbe {
    /// Create a probe using the tool names from `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            python_interpreters: settings.python_interpreters.clone(),
            package_list_command: settings.package_list_command.clone(),
            nvidia_smi: settings.nvidia_smi.clone(),
            nvcc: settings.nvcc.clone(),
            git: settings.git.clone(),
        }
    }

    /// GPU queries using the same driver tool as the probe.
    pub fn gpu_query(&self) -> GpuQuery {
        GpuQuery::new(self.nvidia_smi.clone())
    }
}

impl Default for DefaultSystemProbe {
    fn default() -> Self {
        Self::new(&Settings::with_defaults())
    }
}

impl SystemProbePort for DefaultSystemProbe {
    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn python_version_line(&self) -> Option<String> {
        version_line(&self.python_interpreters)
    }

    fn hostname(&self) -> Option<String> {
        System::host_name()
    }

    fn nvidia_driver_output(&self) -> Option<String> {
        driver_version_output(&self.nvidia_smi)
    }

    fn nvcc_version_output(&self) -> Option<String> {
        nvcc_version_output(&self.nvcc)
    }

    fn read_cudnn_header(&self, path: &Path) -> Option<String> {
        if !cfg!(target_os = "linux") {
            return None;
        }
        fs::read_to_string(path)
            .inspect_err(|e| debug!(path = %path.display(), error = %e, "cannot read cudnn header"))
            .ok()
    }

    fn installed_packages(&self) -> Option<Vec<String>> {
        installed_packages(&self.package_list_command)
    }

    fn vcs_head(&self, path: &Path) -> Option<String> {
        vcs_head(&self.git, path)
    }
}
