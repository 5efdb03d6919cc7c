//! Env file loading and client configuration from flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use briefcase_llm::{ClientConfig, Provider};

use crate::cli::ModelArgs;
use crate::output;

/// Upward search stops after this many parent directories.
const MAX_DEPTH: usize = 32;

/// Load env files into the process environment.
///
/// Order: 1) nearest `.briefcase/env`  2) nearest `.env`  3) `~/.briefcase/env`.
/// dotenvy never overrides a variable that is already set, so real env vars
/// win over every file and earlier files win over later ones.
pub fn load_env_files() {
    let cwd = std::env::current_dir().ok();
    let mut files = Vec::new();
    if let Some(cwd) = cwd.as_deref() {
        files.extend(find_upwards(cwd, Path::new(".briefcase/env")));
        files.extend(find_upwards(cwd, Path::new(".env")));
    }
    if let Some(home) = dirs::home_dir() {
        let global = home.join(".briefcase").join("env");
        if global.is_file() {
            files.push(global);
        }
    }

    for file in files {
        if let Err(e) = dotenvy::from_path(&file) {
            output::warning(&format!("Ignoring {}: {e}", file.display()));
        }
    }
}

/// Nearest `relative` in `start` or one of its ancestors.
fn find_upwards(start: &Path, relative: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_DEPTH)
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.is_file())
}

/// Environment configuration with command-line overrides applied.
pub fn client_config(args: &ModelArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid model configuration")?;
    apply_overrides(&mut config, args)?;
    Ok(config)
}

fn apply_overrides(config: &mut ClientConfig, args: &ModelArgs) -> Result<()> {
    if let Some(provider) = args.provider.as_deref() {
        let provider: Provider = provider.parse()?;
        if provider != config.provider {
            // A URL meant for the other server flavour is not reused.
            config.provider = provider;
            config.base_url = None;
        }
    }
    if let Some(url) = args.base_url.as_deref() {
        *config = config.clone().with_base_url(url);
    }
    if let Some(model) = args.model.as_deref() {
        config.model = Some(model.to_string());
    }
    if let Some(secs) = args.timeout {
        config.timeout_secs = secs;
    }
    Ok(())
}
