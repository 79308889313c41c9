//! Command-line front end for mlu.
//!
//! `main.rs` is the composition root; this library holds the parser,
//! bootstrap and command handlers so they can be tested.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, load_settings};
pub use commands::{Commands, GpuCommand};
pub use error::CliError;
pub use parser::Cli;
