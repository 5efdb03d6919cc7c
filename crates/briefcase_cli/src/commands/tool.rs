//! `briefcase <tool>`: interactive session, or one request with `--input`.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{bail, Context, Result};
use briefcase_core::{Reply, Tool};
use briefcase_llm::ModelClient;

use crate::cli::ModelArgs;
use crate::config::client_config;
use crate::output;
use crate::session::{respond, Session};

pub async fn handle(tool: &'static Tool, input: Option<&Path>, model: &ModelArgs) -> Result<()> {
    let config = client_config(model)?;
    let client = config.build().context("Failed to set up model client")?;
    tracing::info!(
        tool = tool.id,
        provider = %config.provider,
        base_url = config.resolved_base_url(),
        model = client.model(),
        "client ready"
    );

    match input {
        Some(path) => one_shot(tool, client.as_ref(), path).await,
        None => interactive(tool, client.as_ref()).await,
    }
}

async fn interactive(tool: &'static Tool, client: &dyn ModelClient) -> Result<()> {
    let json = output::is_json();
    let spinner = !json && std::io::stderr().is_terminal();
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();

    Session::new(tool, client, stdin, stdout)
        .with_json(json)
        .with_spinner(spinner)
        .run()
        .await
        .context("Terminal I/O failed")
}

async fn one_shot(tool: &'static Tool, client: &dyn ModelClient, path: &Path) -> Result<()> {
    let text = super::read_input(Some(path))?;

    let spinner = (!output::is_json() && std::io::stderr().is_terminal())
        .then(|| output::spinner(tool.progress));
    let reply = request(tool, client, &text).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let reply = reply?;

    match &reply {
        Reply::Structured(result) => {
            if let Some(reason) = result.failure() {
                tracing::debug!(reason, "returning fallback result");
            }
            output::header(tool.heading);
            output::data(tool.heading, result);
        }
        Reply::Text(text) => {
            output::header(tool.heading);
            output::text(tool.heading, text);
        }
    }
    Ok(())
}

/// One request from file input. Trailing whitespace is dropped, so the
/// model sees the same text as an interactive request.
async fn request(tool: &Tool, client: &dyn ModelClient, text: &str) -> Result<Reply> {
    let text = text.trim_end();
    if text.trim_start().is_empty() {
        bail!("{}", tool.missing_input);
    }
    Ok(respond(tool, client, text).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockClient;

    #[tokio::test]
    async fn test_request_drops_trailing_newlines() {
        let tool = Tool::find("summary").unwrap();
        let client = MockClient::ok("Revenue grew.");
        let reply = request(tool, &client, "Revenue up 12%\n\n").await.unwrap();
        assert_eq!(reply, Reply::Text("Revenue grew.".into()));

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(
            prompts[0].user,
            "Summarize the following quarterly report:\n\nRevenue up 12%"
        );
    }

    #[tokio::test]
    async fn test_request_rejects_blank_input() {
        let tool = Tool::find("compliance").unwrap();
        let client = MockClient::ok("unused");
        let err = request(tool, &client, "  \n\n").await.unwrap_err();
        assert_eq!(err.to_string(), "No policy text provided");
        assert_eq!(client.calls(), 0);
    }
}
