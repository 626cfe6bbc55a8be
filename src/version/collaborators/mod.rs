//! Command-backed collaborator implementations

pub mod container_cli;
pub mod repoquery;

pub use container_cli::ContainerCli;
pub use repoquery::RepoqueryCommand;

use std::process::Command;

use tracing::debug;

use crate::version::error::QueryError;

/// Run a command to completion and return its stdout
fn run_command(program: &str, args: &[String]) -> Result<String, QueryError> {
    let command_line = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Running {}", command_line);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| QueryError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(QueryError::CommandFailed {
            command: command_line,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
