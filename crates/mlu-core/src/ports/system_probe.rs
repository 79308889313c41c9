//! System probe port for watermark fact resolution.
//!
//! This port abstracts active system probing (environment lookups, command
//! execution, header reads) from the watermark service. Implementations
//! live in adapters (e.g., mlu-runtime).
//!
//! # Design Notes
//!
//! - Core owns the trait and the parsers
//! - Runtime owns the implementation (active probing via `Command::new`)
//! - CLI injects the probe via main.rs

use std::path::Path;

/// Port for probing the machine a run executes on.
///
/// Every method is best-effort: `None` means the source was unavailable
/// (variable unset, tool missing, non-zero exit, unreadable file).
///
/// # Example
///
/// ```ignore
/// use mlu_core::ports::SystemProbePort;
///
/// fn driver(probe: &dyn SystemProbePort) -> Option<String> {
///     probe.nvidia_driver_output()
/// }
/// ```
pub trait SystemProbePort: Send + Sync {
    /// Value of a process environment variable.
    fn env_var(&self, key: &str) -> Option<String>;

    /// First line of the interpreter's full version string.
    fn python_version_line(&self) -> Option<String>;

    /// Host name of this machine.
    fn hostname(&self) -> Option<String>;

    /// Raw output of the driver-version query.
    fn nvidia_driver_output(&self) -> Option<String>;

    /// Raw output of the CUDA compiler's version banner.
    fn nvcc_version_output(&self) -> Option<String>;

    /// Contents of a cuDNN header, `None` if unreadable or unsupported here.
    fn read_cudnn_header(&self, path: &Path) -> Option<String>;

    /// Lines of the installed-package listing.
    fn installed_packages(&self) -> Option<Vec<String>>;

    /// Commit hash checked out at `path`.
    fn vcs_head(&self, path: &Path) -> Option<String>;
}
