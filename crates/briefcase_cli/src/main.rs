//! CLI entry point for briefcase.

mod cli;
mod commands;
mod config;
mod output;
mod session;
#[cfg(test)]
mod testing;

use briefcase_observability::ObservabilityConfig;
use clap::Parser;

use crate::cli::Cli;

fn init_logging(verbose: bool) {
    let mut config =
        ObservabilityConfig::from_env().with_version(env!("CARGO_PKG_VERSION"));
    if verbose {
        config = config.with_log_level("debug");
    }
    if let Err(e) = briefcase_observability::init(config) {
        output::warning(&format!("Logging disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    config::load_env_files();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    if let Err(e) = commands::handle(cli).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
