//! Subscriber initialization.
//!
//! Log lines go to stderr so stdout stays clean for results and JSON output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

/// Install the global subscriber described by `config`.
///
/// Fails if the filter directive does not parse or a subscriber is already
/// installed.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| ObservabilityError::Config(format!("{}: {e}", config.filter_directive())))?;

    // Build layers separately, then compose once
    let fmt_layer = config.enable_console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(true)
    });

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    tracing::debug!(
        service.name = %config.service_name,
        service.version = config.service_version.as_deref().unwrap_or("unknown"),
        filter = config.filter_directive(),
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_directive_is_config_error() {
        let config = ObservabilityConfig::new("test").with_log_level("briefcase=loud");
        assert!(matches!(init(config), Err(ObservabilityError::Config(_))));
    }
}
