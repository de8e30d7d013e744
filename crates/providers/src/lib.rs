//! Reasoning engine providers for Wayfarer.
//!
//! All providers implement the `wayfarer_core::Provider` trait.
//! [`build_from_config`] picks and constructs the configured one.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use std::sync::Arc;
use wayfarer_config::AppConfig;
use wayfarer_core::error::ProviderError;
use wayfarer_core::provider::Provider;

/// Build the reasoning engine provider from configuration.
///
/// Fails with `NotConfigured` when no API key is available, so hosts can
/// refuse to start rather than fault on the first request.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ProviderError::NotConfigured(
                "no API key; set WAYFARER_API_KEY or api_key in config.toml".into(),
            )
        })?;

    let provider = OpenAiCompatProvider::new("openai-compat", &config.base_url, api_key)?;
    tracing::debug!(base_url = %config.base_url, model = %config.model, "Provider built");
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_not_configured() {
        let config = AppConfig::default();
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn builds_with_key() {
        let config = AppConfig {
            api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "openai-compat");
    }
}
