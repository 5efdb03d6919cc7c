//! briefcase-llm: model clients for local (and OpenAI-compatible) chat endpoints.

mod client;
mod config;
mod error;
mod openai;

pub use client::{
    ModelClient, OllamaClient, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_TIMEOUT_SECS,
};
pub use config::{ClientConfig, Provider};
pub use error::{LlmError, Result};
pub use openai::{OpenAiClient, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_URL};
