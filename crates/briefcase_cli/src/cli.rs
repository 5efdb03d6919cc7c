//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use briefcase_core::{SchemaKind, Tool};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Office writing helpers backed by a local language model
#[derive(Parser)]
#[command(name = "briefcase", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

/// Model server overrides. Unset flags fall back to BRIEFCASE_* env vars.
#[derive(Args, Debug, Default, Clone)]
pub struct ModelArgs {
    /// Model server flavour: ollama or openai
    #[arg(long, global = true)]
    pub provider: Option<String>,
    /// Model name (e.g. gemma3:latest, llama3.2)
    #[arg(long, global = true)]
    pub model: Option<String>,
    /// Server URL (default: http://localhost:11434 for ollama)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ToolArgs {
    /// Read input from a file ('-' for stdin) and run once instead of interactively
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Market analysis brief (SWOT, trends, citations) from articles and reports
    Market(ToolArgs),
    /// Review an HR policy draft for compliance issues
    Compliance(ToolArgs),
    /// Summarize a meeting transcript into decisions and action items
    Minutes(ToolArgs),
    /// Draft a client email summarizing project progress
    Email(ToolArgs),
    /// Executive summary of a quarterly report
    Summary(ToolArgs),
    /// List available tools
    Tools,
    /// Recover structured JSON from a saved model reply (no model call)
    Extract {
        /// Expected shape: market or compliance
        #[arg(short, long, value_parser = parse_schema)]
        schema: SchemaKind,
        /// Reply file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the prompt a tool would send, without calling the model
    Prompt {
        /// Tool ID (see `briefcase tools`)
        #[arg(value_parser = parse_tool)]
        tool: &'static Tool,
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

impl Command {
    /// Tool and arguments for the five tool subcommands.
    pub fn as_tool(&self) -> Option<(&'static Tool, &ToolArgs)> {
        let (id, args) = match self {
            Command::Market(args) => ("market", args),
            Command::Compliance(args) => ("compliance", args),
            Command::Minutes(args) => ("minutes", args),
            Command::Email(args) => ("email", args),
            Command::Summary(args) => ("summary", args),
            Command::Tools | Command::Extract { .. } | Command::Prompt { .. } => return None,
        };
        Tool::find(id).map(|tool| (tool, args))
    }
}

fn parse_schema(s: &str) -> Result<SchemaKind, String> {
    s.parse().map_err(|e: briefcase_core::SchemaError| e.to_string())
}

fn parse_tool(s: &str) -> Result<&'static Tool, String> {
    Tool::find(s).ok_or_else(|| {
        let ids: Vec<_> = Tool::all().iter().map(|t| t.id).collect();
        format!("unknown tool '{}' (available: {})", s, ids.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tool_subcommand_with_global_flags() {
        let cli = Cli::try_parse_from([
            "briefcase",
            "compliance",
            "--input",
            "policy.txt",
            "--model",
            "llama3.2",
            "-o",
            "json",
        ])
        .unwrap();
        let (tool, args) = cli.command.as_tool().unwrap();
        assert_eq!(tool.id, "compliance");
        assert_eq!(args.input.as_deref(), Some(std::path::Path::new("policy.txt")));
        assert_eq!(cli.model.model.as_deref(), Some("llama3.2"));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_extract_parses_schema() {
        let cli = Cli::try_parse_from(["briefcase", "extract", "--schema", "market"]).unwrap();
        match cli.command {
            Command::Extract { schema, input } => {
                assert_eq!(schema, SchemaKind::MarketBrief);
                assert!(input.is_none());
            }
            _ => panic!("expected extract"),
        }
        assert!(Cli::try_parse_from(["briefcase", "extract", "--schema", "swot"]).is_err());
    }

    #[test]
    fn test_prompt_rejects_unknown_tool() {
        assert!(Cli::try_parse_from(["briefcase", "prompt", "poem"]).is_err());
        assert!(Cli::try_parse_from(["briefcase", "prompt", "email"]).is_ok());
    }
}
