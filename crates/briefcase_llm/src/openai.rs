//! OpenAI-compatible Chat Completions client (api.openai.com, llama.cpp, vLLM, LM Studio).

use async_trait::async_trait;
use briefcase_core::Prompt;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::client::{read_reply, with_deadline, ChatMessage, ModelClient, DEFAULT_TIMEOUT_SECS};
use crate::error::{LlmError, Result};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI-compatible HTTP client.
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl OpenAiClient {
    /// `api_key` is required for the hosted API. Self-hosted servers passed
    /// via `base_url` may run without one.
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self> {
        if api_key.is_none() && base_url.is_none() {
            return Err(LlmError::MissingApiKey(API_KEY_ENV));
        }
        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            api_key,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client: reqwest::Client::new(),
        })
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    async fn chat(&self, prompt: &Prompt) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: ChatMessage::pair(prompt),
        };
        let mut req = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let (status, text) = with_deadline(self.timeout_secs, read_reply(req)).await??;
        if !status.is_success() {
            return Err(LlmError::Status {
                provider: "openai",
                status: status.as_u16(),
                body: text,
            });
        }
        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    fn provider(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let span = tracing::info_span!("llm.generate", provider = "openai", model = %self.model);
        self.chat(prompt).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_hosted_api_requires_key() {
        assert!(matches!(
            OpenAiClient::new(None, None, None),
            Err(LlmError::MissingApiKey(API_KEY_ENV))
        ));
        assert!(OpenAiClient::new(None, Some("http://localhost:8080".into()), None).is_ok());
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_and_reads_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({ "model": "local-model" })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"{\"issues\":[]}"}}]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(
            Some("sk-test".into()),
            Some(server.url()),
            Some("local-model".into()),
        )
        .unwrap();
        let prompt = Prompt {
            system: "s".into(),
            user: "u".into(),
        };
        assert_eq!(client.generate(&prompt).await.unwrap(), r#"{"issues":[]}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_reply() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(None, Some(server.url()), None).unwrap();
        let prompt = Prompt {
            system: "s".into(),
            user: "u".into(),
        };
        assert_eq!(client.generate(&prompt).await.unwrap(), "");
    }
}
