//! Client configuration: provider selection, endpoint, model, timeout.

use std::str::FromStr;

use crate::client::{
    ModelClient, OllamaClient, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{LlmError, Result};
use crate::openai::{OpenAiClient, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_URL};

/// Model server flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Ollama,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Ollama => "ollama",
            Provider::OpenAi => "openai",
        }
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Provider::Ollama),
            "openai" | "openai-compatible" => Ok(Provider::OpenAi),
            other => Err(LlmError::Config(format!(
                "unknown provider '{other}' (expected ollama or openai)"
            ))),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub provider: Provider,
    /// None = provider default
    pub base_url: Option<String>,
    /// None = provider default
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            base_url: None,
            model: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(normalize_url(&url.into()));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads:
    /// - `BRIEFCASE_PROVIDER` → provider (ollama | openai)
    /// - `BRIEFCASE_BASE_URL`, else `OLLAMA_HOST` / `OPENAI_BASE_URL` → base_url
    /// - `BRIEFCASE_MODEL` → model
    /// - `BRIEFCASE_API_KEY` or `OPENAI_API_KEY` → api_key
    /// - `BRIEFCASE_TIMEOUT_SECS` → timeout_secs
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("BRIEFCASE_PROVIDER") {
            Some(p) => p.parse()?,
            None => Provider::default(),
        };
        let mut config = Self::new(provider);

        let provider_url = match provider {
            Provider::Ollama => "OLLAMA_HOST",
            Provider::OpenAi => "OPENAI_BASE_URL",
        };
        if let Some(url) = get("BRIEFCASE_BASE_URL").or_else(|| get(provider_url)) {
            config = config.with_base_url(url);
        }
        config.model = get("BRIEFCASE_MODEL");
        config.api_key = get("BRIEFCASE_API_KEY").or_else(|| get("OPENAI_API_KEY"));

        if let Some(raw) = get("BRIEFCASE_TIMEOUT_SECS") {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                LlmError::Config(format!(
                    "BRIEFCASE_TIMEOUT_SECS must be a number of seconds, got '{raw}'"
                ))
            })?;
        }

        Ok(config)
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(match self.provider {
            Provider::Ollama => DEFAULT_OLLAMA_URL,
            Provider::OpenAi => DEFAULT_OPENAI_URL,
        })
    }

    pub fn resolved_model(&self) -> &str {
        self.model.as_deref().unwrap_or(match self.provider {
            Provider::Ollama => DEFAULT_OLLAMA_MODEL,
            Provider::OpenAi => DEFAULT_OPENAI_MODEL,
        })
    }

    pub fn build(&self) -> Result<Box<dyn ModelClient>> {
        if self.timeout_secs == 0 {
            return Err(LlmError::Config("timeout must be at least 1 second".into()));
        }
        let client: Box<dyn ModelClient> = match self.provider {
            Provider::Ollama => Box::new(
                OllamaClient::new(self.base_url.clone(), self.model.clone())
                    .with_timeout(self.timeout_secs),
            ),
            Provider::OpenAi => Box::new(
                OpenAiClient::new(self.api_key.clone(), self.base_url.clone(), self.model.clone())?
                    .with_timeout(self.timeout_secs),
            ),
        };
        Ok(client)
    }
}

/// `OLLAMA_HOST` is often given as bare `host:port`.
fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("ollama".parse::<Provider>().unwrap(), Provider::Ollama);
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider, Provider::Ollama);
        assert_eq!(config.resolved_base_url(), "http://localhost:11434");
        assert_eq!(config.resolved_model(), "gemma3:latest");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_ollama_host_without_scheme() {
        let config = ClientConfig::from_lookup(lookup(&[("OLLAMA_HOST", "10.0.0.5:11434")])).unwrap();
        assert_eq!(config.resolved_base_url(), "http://10.0.0.5:11434");
    }

    #[test]
    fn test_briefcase_vars_take_priority() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BRIEFCASE_PROVIDER", "openai"),
            ("BRIEFCASE_BASE_URL", "http://127.0.0.1:8080/"),
            ("OPENAI_BASE_URL", "http://ignored"),
            ("BRIEFCASE_MODEL", "qwen2.5"),
            ("OPENAI_API_KEY", "sk-x"),
            ("BRIEFCASE_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.resolved_model(), "qwen2.5");
        assert_eq!(config.api_key.as_deref(), Some("sk-x"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[("BRIEFCASE_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("BRIEFCASE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_build() {
        let client = ClientConfig::new(Provider::Ollama).with_model("llama3.2").build().unwrap();
        assert_eq!(client.provider(), "ollama");
        assert_eq!(client.model(), "llama3.2");

        assert!(ClientConfig::new(Provider::OpenAi).build().is_err());
        assert!(ClientConfig::default().with_timeout(0).build().is_err());
    }
}
