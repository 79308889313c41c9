//! CLI bootstrap - the composition root.
//!
//! Settings are resolved here (file, then `MLU_*` environment overrides)
//! and the concrete system probe is instantiated. Handlers receive the
//! composed [`CliContext`].

use std::path::Path;
use std::sync::Arc;

use mlu_core::{Settings, WatermarkService};
use mlu_runtime::{DefaultSystemProbe, GpuQuery};
use tracing::debug;

use crate::error::CliError;

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub settings: Settings,
    pub probe: Arc<DefaultSystemProbe>,
}

impl CliContext {
    pub fn new(settings: Settings) -> Self {
        let probe = Arc::new(DefaultSystemProbe::new(&settings));
        Self { settings, probe }
    }

    pub fn watermark_service(&self) -> WatermarkService {
        WatermarkService::new(self.probe.clone(), self.settings.clone())
    }

    pub fn gpu_query(&self) -> GpuQuery {
        self.probe.gpu_query()
    }
}

/// Resolve settings from an optional file and an environment lookup.
pub fn load_settings<F>(config: Option<&Path>, lookup: F) -> Result<Settings, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match config {
        Some(path) => {
            debug!(path = %path.display(), "loading settings file");
            Settings::load(path)?
        }
        None => Settings::with_defaults(),
    };
    settings.apply_env_overrides(lookup)?;
    Ok(settings)
}

/// Build the CLI context from the process environment.
pub fn bootstrap(config: Option<&Path>) -> Result<CliContext, CliError> {
    let settings = load_settings(config, |key| std::env::var(key).ok())?;
    Ok(CliContext::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = load_settings(None, no_env).unwrap();
        assert_eq!(settings, Settings::with_defaults());
    }

    #[test]
    fn test_config_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mlu.json");
        fs::write(&path, r#"{"label_width": 20, "nvcc": "/opt/cuda/bin/nvcc"}"#).unwrap();

        let settings = load_settings(Some(&path), |key| {
            (key == "MLU_LABEL_WIDTH").then(|| "12".to_string())
        })
        .unwrap();
        assert_eq!(settings.label_width, 12);
        assert_eq!(settings.nvcc, "/opt/cuda/bin/nvcc");
    }

    #[test]
    fn test_bad_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mlu.json");
        fs::write(&path, "not json").unwrap();

        let err = load_settings(Some(&path), no_env).err().unwrap();
        assert_eq!(err.exit_code(), 78);

        let missing = dir.path().join("missing.json");
        assert!(load_settings(Some(&missing), no_env).is_err());
    }

    #[test]
    fn test_context_uses_settings() {
        let ctx = CliContext::new(Settings::with_defaults());
        assert_eq!(ctx.watermark_service().settings().label_width, 15);
    }
}
