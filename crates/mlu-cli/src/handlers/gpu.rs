//! GPU command handler.

use anyhow::Result;
use mlu_core::GpuMap;
use serde::Serialize;

use crate::bootstrap::CliContext;
use crate::commands::GpuCommand;
use crate::error::CliError;

fn render_map<T>(map: &GpuMap<T>, json: bool) -> Result<String>
where
    T: std::fmt::Display + Serialize,
{
    if json {
        Ok(serde_json::to_string_pretty(map)?)
    } else {
        Ok(map.to_string())
    }
}

/// Execute a GPU query.
pub fn execute(ctx: &CliContext, command: &GpuCommand) -> Result<()> {
    let query = ctx.gpu_query();
    let output = match command {
        GpuCommand::Memory { json } => {
            render_map(&query.memory_map().map_err(CliError::from)?, *json)?
        }
        GpuCommand::Names { json } => {
            render_map(&query.names_map().map_err(CliError::from)?, *json)?
        }
        GpuCommand::Name { n } => query
            .name_by_index(*n)
            .map_err(CliError::from)?
            .ok_or_else(|| CliError::Arguments(format!("No GPU with index {n}")))?,
    };
    println!("{output}");
    Ok(())
}
