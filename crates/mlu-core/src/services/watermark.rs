//! Environment watermark collection.
//!
//! The service resolves a [`FactRequest`] against a [`SystemProbePort`] in
//! two passes (built-ins, then packages) and renders the result. Each fact
//! is an explicit `Option`: built-ins whose source is unavailable are left
//! out of the report, while `virtualenv`, `python`, `hostname` and package
//! identifiers always get an entry, possibly empty.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::facts::{
    Builtin, FactReport, FactRequest, NVIDIA_CUDA_LABEL, NVIDIA_DRIVER_LABEL, cuda_release,
    cudnn_version, find_in_lines, first_line, python_version, vcs_path,
};
use crate::ports::SystemProbePort;
use crate::settings::Settings;

/// A collected report together with its rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Watermark {
    pub report: FactReport,
    #[serde(skip)]
    pub text: String,
}

impl Watermark {
    /// Write the rendered text to stdout.
    pub fn print(&self) {
        println!("{}", self.text);
    }
}

/// Watermark collector over an injected probe.
#[derive(Clone)]
pub struct WatermarkService {
    probe: Arc<dyn SystemProbePort>,
    settings: Settings,
}

impl WatermarkService {
    pub fn new(probe: Arc<dyn SystemProbePort>, settings: Settings) -> Self {
        Self { probe, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve every requested fact. Never fails.
    pub fn collect(&self, request: &FactRequest) -> Watermark {
        let plan = request.plan();
        let mut report = FactReport::new();

        for builtin in &plan.builtins {
            self.resolve_builtin(*builtin, &mut report);
        }

        if !plan.packages.is_empty() {
            let listing = self.probe.installed_packages();
            if listing.is_none() {
                debug!("package listing unavailable, package facts will be empty");
            }
            let listing = listing.unwrap_or_default();

            for identifier in &plan.packages {
                let value = self.resolve_package(identifier, &listing);
                report.insert(identifier.as_str(), value);
            }
        }

        let text = report.render(self.settings.label_width);
        Watermark { report, text }
    }

    /// Collect and print, returning the rendered text.
    pub fn watermark(&self, request: &FactRequest) -> String {
        let watermark = self.collect(request);
        watermark.print();
        watermark.text
    }

    fn resolve_builtin(&self, builtin: Builtin, report: &mut FactReport) {
        match builtin {
            Builtin::Virtualenv => {
                report.insert(builtin.as_str(), self.virtualenv().unwrap_or_default());
            }
            Builtin::Python => {
                report.insert(builtin.as_str(), self.python().unwrap_or_default());
            }
            Builtin::Hostname => {
                report.insert(builtin.as_str(), self.probe.hostname().unwrap_or_default());
            }
            Builtin::Nvidia => {
                let Some(driver) = self.nvidia_driver() else {
                    debug!("nvidia driver query failed, omitting nvidia facts");
                    return;
                };
                report.insert(NVIDIA_DRIVER_LABEL, driver);
                match self.cuda_release() {
                    Some(cuda) => report.insert(NVIDIA_CUDA_LABEL, cuda),
                    None => debug!("cuda toolkit release unavailable"),
                }
            }
            Builtin::Cudnn => match self.cudnn() {
                Some(version) => report.insert(builtin.as_str(), version),
                None => debug!("cudnn version unavailable"),
            },
        }
    }

    fn virtualenv(&self) -> Option<String> {
        self.probe
            .env_var("PS1")
            .or_else(|| self.probe.env_var("VIRTUAL_ENV"))
    }

    fn python(&self) -> Option<String> {
        let line = self.probe.python_version_line()?;
        Some(python_version(&line))
    }

    fn nvidia_driver(&self) -> Option<String> {
        first_line(&self.probe.nvidia_driver_output()?)
    }

    fn cuda_release(&self) -> Option<String> {
        cuda_release(&self.probe.nvcc_version_output()?)
    }

    fn cudnn(&self) -> Option<String> {
        self.settings.cudnn_headers.iter().find_map(|path| {
            let header = self.probe.read_cudnn_header(path)?;
            cudnn_version(&header)
        })
    }

    fn resolve_package(&self, identifier: &str, listing: &[String]) -> String {
        let name = self.settings.listing_name(identifier);
        let Some(value) = find_in_lines(listing, name, true) else {
            debug!(package = identifier, "not found in package listing");
            return String::new();
        };

        if !self.settings.wants_vcs_hash(identifier) {
            return value;
        }

        match vcs_path(&value).and_then(|path| self.probe.vcs_head(Path::new(&path))) {
            Some(hash) => format!("{value} {hash}"),
            None => {
                debug!(package = identifier, "no commit hash for package location");
                value
            }
        }
    }
}
