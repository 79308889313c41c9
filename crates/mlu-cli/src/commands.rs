//! Main commands enum and subcommands.

use std::path::PathBuf;

use clap::Subcommand;
use mlu_core::DEFAULT_SEPARATOR;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the environment watermark (python, GPU driver, packages, ...)
    Watermark {
        /// Facts to report: python, virtualenv, nvidia, cudnn, hostname or
        /// any package name. Defaults to python virtualenv nvidia cudnn
        /// hostname torch.
        facts: Vec<String>,
        /// Print the report as a JSON object instead of aligned lines
        #[arg(long)]
        json: bool,
    },

    /// Query GPUs through nvidia-smi
    Gpu {
        #[command(subcommand)]
        command: GpuCommand,
    },

    /// Run a command and print its stdout and stderr
    Exec {
        /// Command line, split on whitespace
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Flatten a nested JSON config into single-level keys
    Flatten {
        /// JSON file holding an object
        file: PathBuf,
        /// Separator placed between nested keys
        #[arg(long, default_value = DEFAULT_SEPARATOR)]
        sep: String,
    },
}

/// GPU query subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GpuCommand {
    /// Memory in use per device (MiB)
    Memory {
        #[arg(long)]
        json: bool,
    },
    /// Product name per device
    Names {
        #[arg(long)]
        json: bool,
    },
    /// Product name of one device
    Name {
        /// Device index
        n: usize,
    },
}
