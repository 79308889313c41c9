//! CLI entry point - the composition root.
//!
//! Settings and the system probe are wired together via bootstrap;
//! command dispatch routes to handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mlu_cli::{Cli, CliError, Commands, bootstrap, handlers};

/// Logs go to stderr; stdout carries reports and JSON.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(cli.config.as_deref())?;

    match command {
        Commands::Watermark { facts, json } => {
            handlers::watermark::execute(&ctx, &facts, json)?;
        }
        Commands::Gpu { command } => {
            handlers::gpu::execute(&ctx, &command)?;
        }
        Commands::Exec { command } => {
            handlers::exec::execute(&command)?;
        }
        Commands::Flatten { file, sep } => {
            handlers::flatten::execute(&file, &sep)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}
