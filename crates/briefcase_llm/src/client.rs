//! Model client: trait + Ollama implementation (self-hosted).

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use briefcase_core::Prompt;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::Instrument;

use crate::error::{LlmError, Result};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma3:latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// One request, one reply. No retries, no streaming.
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn provider(&self) -> &'static str;

    fn model(&self) -> &str;

    async fn generate(&self, prompt: &Prompt) -> Result<String>;
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub(crate) fn pair(prompt: &'a Prompt) -> [ChatMessage<'a>; 2] {
        [
            ChatMessage {
                role: "system",
                content: &prompt.system,
            },
            ChatMessage {
                role: "user",
                content: &prompt.user,
            },
        ]
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaReplyMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaReplyMessage,
}

/// Ollama HTTP client (localhost:11434). Self-hosted, no external API.
pub struct OllamaClient {
    base_url: String,
    model: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    async fn chat(&self, prompt: &Prompt) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let body = OllamaChatRequest {
            model: &self.model,
            messages: ChatMessage::pair(prompt),
            stream: false,
        };

        let request = self.client.post(&url).json(&body);
        let (status, text) = with_deadline(self.timeout_secs, read_reply(request)).await??;
        if !status.is_success() {
            return Err(LlmError::Status {
                provider: "ollama",
                status: status.as_u16(),
                body: text,
            });
        }
        let parsed: OllamaChatResponse = serde_json::from_str(&text)?;
        Ok(parsed.message.content)
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    fn provider(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let span = tracing::info_span!("llm.generate", provider = "ollama", model = %self.model);
        async {
            let reply = self.chat(prompt).await?;
            tracing::debug!(chars = reply.len(), "model replied");
            Ok(reply)
        }
        .instrument(span)
        .await
    }
}

/// Send `request` and read the whole body, whatever the status.
pub(crate) async fn read_reply(
    request: reqwest::RequestBuilder,
) -> Result<(reqwest::StatusCode, String)> {
    let res = request.send().await?;
    let status = res.status();
    Ok((status, res.text().await?))
}

/// Run `fut` under a whole-request deadline.
pub(crate) async fn with_deadline<F, T>(secs: u64, fut: F) -> Result<T>
where
    F: Future<Output = T>,
{
    timeout(Duration::from_secs(secs), fut)
        .await
        .map_err(|_| LlmError::Timeout(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn prompt() -> Prompt {
        Prompt {
            system: "You are terse.".into(),
            user: "Say hi".into(),
        }
    }

    #[tokio::test]
    async fn test_generate_posts_chat_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::Json(json!({
                "model": "gemma3:latest",
                "messages": [
                    { "role": "system", "content": "You are terse." },
                    { "role": "user", "content": "Say hi" }
                ],
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"gemma3:latest","message":{"role":"assistant","content":"hi"},"done":true}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(Some(server.url()), None);
        let reply = client.generate(&prompt()).await.unwrap();
        assert_eq!(reply, "hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_surfaces_status_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model 'nope' not found"}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(Some(server.url()), Some("nope".into()));
        let err = client.generate(&prompt()).await.unwrap_err();
        match err {
            LlmError::Status { status, body, .. } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_unexpected_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = OllamaClient::new(Some(server.url()), None);
        assert!(matches!(
            client.generate(&prompt()).await,
            Err(LlmError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OllamaClient::new(Some(format!("http://{addr}")), None).with_timeout(5);
        assert!(client.generate(&prompt()).await.is_err());
    }

    #[tokio::test]
    async fn test_deadline_elapses() {
        let result = with_deadline(0, std::future::pending::<()>()).await;
        assert!(matches!(result, Err(LlmError::Timeout(0))));
    }
}
