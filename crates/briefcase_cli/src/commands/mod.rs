//! Command dispatch.

pub mod extract;
pub mod prompt;
pub mod tool;
pub mod tools;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    if let Some((tool, args)) = cli.command.as_tool() {
        return tool::handle(tool, args.input.as_deref(), &cli.model).await;
    }
    match cli.command {
        Command::Tools => tools::handle(),
        Command::Extract { schema, input } => extract::handle(schema, input.as_deref()),
        Command::Prompt { tool, input } => prompt::handle(tool, input.as_deref()),
        Command::Market(_)
        | Command::Compliance(_)
        | Command::Minutes(_)
        | Command::Email(_)
        | Command::Summary(_) => unreachable!("tool commands are dispatched above"),
    }
}

/// Read a whole input file; `None` or `-` means stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
