//! Settings domain types and validation.
//!
//! Settings control which tools the probe invokes and how the watermark is
//! rendered. Defaults match a stock Linux CUDA install; every field can be
//! overridden from a JSON file or from `MLU_*` environment variables.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::facts::DEFAULT_LABEL_WIDTH;

/// Override for the interpreter, e.g. `MLU_PYTHON=/opt/conda/bin/python`.
pub const ENV_PYTHON: &str = "MLU_PYTHON";

/// Override for the listing command, split on whitespace.
pub const ENV_PIP: &str = "MLU_PIP";

/// Override for the cuDNN header location.
pub const ENV_CUDNN_HEADER: &str = "MLU_CUDNN_HEADER";

/// Override for the label column width.
pub const ENV_LABEL_WIDTH: &str = "MLU_LABEL_WIDTH";

const MAX_LABEL_WIDTH: usize = 64;

/// Application settings structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Interpreters tried in order for the `python` fact.
    pub python_interpreters: Vec<String>,

    /// Command printing the installed-package listing.
    pub package_list_command: Vec<String>,

    /// GPU driver query tool.
    pub nvidia_smi: String,

    /// CUDA compiler used for the toolkit release.
    pub nvcc: String,

    /// VCS binary used for commit lookups.
    pub git: String,

    /// cuDNN headers tried in order; cuDNN 8+ moved the macros to `cudnn_version.h`.
    pub cudnn_headers: Vec<PathBuf>,

    /// Column width of the `label:` prefix.
    pub label_width: usize,

    /// Packages whose listing entry gets a commit hash appended.
    pub vcs_packages: Vec<String>,

    /// Identifier -> name as it appears in the listing (e.g. `keras` -> `Keras`).
    pub package_aliases: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Settings {
    /// Create settings with sensible defaults.
    pub fn with_defaults() -> Self {
        Self {
            python_interpreters: vec!["python3".to_string(), "python".to_string()],
            package_list_command: vec!["pip".to_string(), "list".to_string()],
            nvidia_smi: "nvidia-smi".to_string(),
            nvcc: "nvcc".to_string(),
            git: "git".to_string(),
            cudnn_headers: vec![
                PathBuf::from("/usr/local/cuda/include/cudnn.h"),
                PathBuf::from("/usr/local/cuda/include/cudnn_version.h"),
            ],
            label_width: DEFAULT_LABEL_WIDTH,
            vcs_packages: vec!["sparseconvnet".to_string(), "pytorch-lightning".to_string()],
            package_aliases: BTreeMap::from([("keras".to_string(), "Keras".to_string())]),
        }
    }

    /// Read settings from a JSON file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings: Self = serde_json::from_str(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Apply `MLU_*` overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), SettingsError> {
        self.apply_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `MLU_*` overrides from an arbitrary lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(python) = lookup(ENV_PYTHON).filter(|v| !v.trim().is_empty()) {
            self.python_interpreters = vec![python.trim().to_string()];
        }
        if let Some(pip) = lookup(ENV_PIP) {
            self.package_list_command = pip.split_whitespace().map(ToString::to_string).collect();
        }
        if let Some(header) = lookup(ENV_CUDNN_HEADER).filter(|v| !v.trim().is_empty()) {
            self.cudnn_headers = vec![PathBuf::from(header.trim())];
        }
        if let Some(width) = lookup(ENV_LABEL_WIDTH) {
            self.label_width = width
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidEnvValue {
                    key: ENV_LABEL_WIDTH,
                    value: width.clone(),
                })?;
        }
        validate_settings(self)
    }

    /// Name to search for in the package listing.
    pub fn listing_name<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.package_aliases
            .get(identifier)
            .map_or(identifier, String::as_str)
    }

    pub fn wants_vcs_hash(&self, identifier: &str) -> bool {
        self.vcs_packages.iter().any(|p| p == identifier)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Label width must be between 1 and 64, got {0}")]
    InvalidLabelWidth(usize),

    #[error("At least one python interpreter must be configured")]
    NoPythonInterpreter,

    #[error("Package list command cannot be empty")]
    EmptyPackageListCommand,

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnvValue { key: &'static str, value: String },

    #[error("Failed to read settings file {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse settings file {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.label_width == 0 || settings.label_width > MAX_LABEL_WIDTH {
        return Err(SettingsError::InvalidLabelWidth(settings.label_width));
    }
    if settings.python_interpreters.is_empty() {
        return Err(SettingsError::NoPythonInterpreter);
    }
    if settings.package_list_command.is_empty() {
        return Err(SettingsError::EmptyPackageListCommand);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::with_defaults();
        assert!(validate_settings(&settings).is_ok());
        assert_eq!(settings.label_width, 15);
        assert_eq!(settings.listing_name("keras"), "Keras");
        assert_eq!(settings.listing_name("torch"), "torch");
        assert!(settings.wants_vcs_hash("sparseconvnet"));
        assert!(!settings.wants_vcs_hash("torch"));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::with_defaults();
        settings
            .apply_env_overrides(lookup_from(&[
                (ENV_PYTHON, "/opt/conda/bin/python"),
                (ENV_PIP, "uv pip list"),
                (ENV_CUDNN_HEADER, "/opt/cudnn/include/cudnn_version.h"),
                (ENV_LABEL_WIDTH, "20"),
            ]))
            .unwrap();

        assert_eq!(settings.python_interpreters, vec!["/opt/conda/bin/python"]);
        assert_eq!(settings.package_list_command, vec!["uv", "pip", "list"]);
        assert_eq!(
            settings.cudnn_headers,
            vec![PathBuf::from("/opt/cudnn/include/cudnn_version.h")]
        );
        assert_eq!(settings.label_width, 20);
    }

    #[test]
    fn test_env_override_rejects_bad_width() {
        let mut settings = Settings::with_defaults();
        let err = settings
            .apply_env_overrides(lookup_from(&[(ENV_LABEL_WIDTH, "wide")]))
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidEnvValue { .. }));

        let err = settings
            .apply_env_overrides(lookup_from(&[(ENV_LABEL_WIDTH, "0")]))
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidLabelWidth(0)));
    }

    #[test]
    fn test_empty_pip_override_is_rejected() {
        let mut settings = Settings::with_defaults();
        let err = settings
            .apply_env_overrides(lookup_from(&[(ENV_PIP, "  ")]))
            .unwrap_err();
        assert!(matches!(err, SettingsError::EmptyPackageListCommand));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mlu.json");
        std::fs::write(&path, r#"{"label_width": 18, "vcs_packages": ["detectron2"]}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.label_width, 18);
        assert_eq!(settings.vcs_packages, vec!["detectron2"]);
        assert_eq!(settings.nvidia_smi, "nvidia-smi");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mlu.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Parse { .. })
        ));
        assert!(matches!(
            Settings::load(&dir.path().join("missing.json")),
            Err(SettingsError::Read { .. })
        ));
    }
}
