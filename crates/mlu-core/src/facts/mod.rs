//! Fact identifiers and request planning.
//!
//! A watermark request is an ordered list of identifiers. Five of them are
//! built-in facts resolved from the process environment or vendor tools;
//! everything else names an installed package. Resolution happens in two
//! explicit passes: all built-ins first (in request order), then all
//! package identifiers (in request order).

mod parse;
mod report;

pub use parse::{
    cuda_release, cudnn_version, find_in_lines, first_line, python_version, vcs_path,
};
pub use report::{DEFAULT_LABEL_WIDTH, FactReport};

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Label used for the NVIDIA driver version.
pub const NVIDIA_DRIVER_LABEL: &str = "nvidia driver";

/// Label used for the CUDA toolkit release.
pub const NVIDIA_CUDA_LABEL: &str = "nvidia cuda";

/// Facts requested when the caller does not name any.
pub const DEFAULT_FACTS: &[&str] = &["python", "virtualenv", "nvidia", "cudnn", "hostname", "torch"];

/// A fact resolved without consulting the installed-package listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Interpreter version (`3.10.12`).
    Python,
    /// `PS1` or `VIRTUAL_ENV`.
    Virtualenv,
    /// Driver version plus CUDA toolkit release.
    Nvidia,
    /// `MAJOR.MINOR.PATCH` from the cuDNN header.
    Cudnn,
    /// Host name of this machine.
    Hostname,
}

impl Builtin {
    pub const ALL: [Self; 5] = [
        Self::Python,
        Self::Virtualenv,
        Self::Nvidia,
        Self::Cudnn,
        Self::Hostname,
    ];

    /// The identifier callers use to request this fact.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Virtualenv => "virtualenv",
            Self::Nvidia => "nvidia",
            Self::Cudnn => "cudnn",
            Self::Hostname => "hostname",
        }
    }

    fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == identifier)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One requested identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FactId {
    Builtin(Builtin),
    /// Anything that is not a built-in is looked up in the package listing.
    Package(String),
}

impl FactId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Builtin(b) => b.as_str(),
            Self::Package(name) => name,
        }
    }
}

impl FromStr for FactId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Builtin::from_identifier(s).map_or_else(|| Self::Package(s.to_string()), Self::Builtin))
    }
}

impl From<&str> for FactId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered collection of requested identifiers.
///
/// Duplicates are allowed here and collapse during planning. Identifiers
/// are trimmed; blank ones are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRequest {
    ids: Vec<FactId>,
}

impl FactRequest {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: identifiers
                .into_iter()
                .filter_map(|s| {
                    let id = s.as_ref().trim();
                    (!id.is_empty()).then(|| FactId::from(id))
                })
                .collect(),
        }
    }

    pub fn ids(&self) -> &[FactId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Split the request into the two resolution passes.
    pub fn plan(&self) -> FactPlan {
        let mut builtins: Vec<Builtin> = Vec::new();
        let mut packages: Vec<String> = Vec::new();

        for id in &self.ids {
            match id {
                FactId::Builtin(b) => {
                    if !builtins.contains(b) {
                        builtins.push(*b);
                    }
                }
                FactId::Package(name) => {
                    if !packages.contains(name) {
                        packages.push(name.clone());
                    }
                }
            }
        }

        FactPlan { builtins, packages }
    }
}

impl Default for FactRequest {
    fn default() -> Self {
        Self::new(DEFAULT_FACTS)
    }
}

/// The request split into its two passes, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactPlan {
    pub builtins: Vec<Builtin>,
    pub packages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_identifiers_are_dropped() {
        let request = FactRequest::new(["hostname", "", "   ", " torch "]);
        assert_eq!(
            request.ids(),
            &[
                FactId::Builtin(Builtin::Hostname),
                FactId::Package("torch".to_string())
            ]
        );
        assert!(FactRequest::new([""]).is_empty());
    }

    #[test]
    fn test_builtin_identifiers_are_recognized() {
        for builtin in Builtin::ALL {
            assert_eq!(FactId::from(builtin.as_str()), FactId::Builtin(builtin));
        }
        assert_eq!(FactId::from("torch"), FactId::Package("torch".to_string()));
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        assert_eq!(FactId::from("Python"), FactId::Package("Python".to_string()));
    }

    #[test]
    fn test_plan_puts_packages_in_second_pass() {
        let request = FactRequest::new(["torch", "hostname", "numpy", "python"]);
        let plan = request.plan();

        assert_eq!(plan.builtins, vec![Builtin::Hostname, Builtin::Python]);
        assert_eq!(plan.packages, vec!["torch".to_string(), "numpy".to_string()]);
    }

    #[test]
    fn test_plan_collapses_duplicates() {
        let request = FactRequest::new(["torch", "python", "torch", "python"]);
        let plan = request.plan();

        assert_eq!(plan.builtins, vec![Builtin::Python]);
        assert_eq!(plan.packages, vec!["torch".to_string()]);
    }

    #[test]
    fn test_default_request() {
        let plan = FactRequest::default().plan();
        assert_eq!(plan.builtins.len(), 5);
        assert_eq!(plan.packages, vec!["torch".to_string()]);
    }
}
