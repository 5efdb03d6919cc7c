//! Test doubles shared by the session and command tests.

use std::sync::Mutex;

use async_trait::async_trait;
use briefcase_core::Prompt;
use briefcase_llm::{LlmError, ModelClient, Result as LlmResult};

/// Canned model that records every prompt it receives.
pub struct MockClient {
    reply: Result<String, u64>,
    pub prompts: Mutex<Vec<Prompt>>,
}

impl MockClient {
    pub fn ok(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with a timeout after `secs`.
    pub fn timing_out(secs: u64) -> Self {
        Self {
            reply: Err(secs),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelClient for MockClient {
    fn provider(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "canned"
    }

    async fn generate(&self, prompt: &Prompt) -> LlmResult<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(secs) => Err(LlmError::Timeout(*secs)),
        }
    }
}
