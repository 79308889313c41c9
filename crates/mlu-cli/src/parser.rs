//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the ML experiment utilities.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "mlu")]
#[command(about = "Record the environment of ML experiments and query GPUs")]
#[command(version = mlu_build_info::LONG_VERSION)]
pub struct Cli {
    /// JSON settings file (tool names, cuDNN headers, label width, ...)
    #[arg(long = "config", env = "MLU_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
