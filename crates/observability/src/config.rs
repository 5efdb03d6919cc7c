//! Configuration for logging

use serde::{Deserialize, Serialize};

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    pub service_name: String,

    /// Service version (optional)
    pub service_version: Option<String>,

    /// Write formatted log lines to stderr
    pub enable_console: bool,

    /// Log level filter (e.g., "info", "briefcase_llm=debug")
    /// Defaults to "warn" if not set
    pub log_level: Option<String>,

    /// ANSI colors in log lines
    pub ansi: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "briefcase".to_string(),
            service_version: None,
            enable_console: true,
            log_level: None,
            ansi: true,
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `BRIEFCASE_LOG` or `RUST_LOG` → log_level
    /// - `NO_COLOR` → ansi = false
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("BRIEFCASE_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|v| !v.trim().is_empty());

        Self {
            log_level,
            ansi: lookup("NO_COLOR").is_none(),
            ..Default::default()
        }
    }

    /// Filter directive used when building the subscriber.
    pub fn filter_directive(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}
