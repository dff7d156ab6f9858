//! Completion client factory.
//!
//! Resolves the configured provider, checks that a key is present, and
//! builds the client. No network call is made here.

use crate::client::LlmClient;
use crate::providers::OpenAiClient;
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;

/// Create a completion client for the named provider.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "aipipe")
/// * `endpoint` - Optional base URL; the provider default is used when absent
/// * `api_key` - API key (required by every provider)
/// * `timeout` - Optional request timeout
///
/// # Errors
/// Returns error if the provider is unknown, the key is missing, or the HTTP
/// client cannot be built.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;

    let api_key = api_key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| format!("{} provider requires API key", provider_type.as_str()))?;

    let base_url = endpoint.unwrap_or(provider_type.default_base_url());
    let mut client = OpenAiClient::with_base_url(base_url, api_key).named(provider_type.as_str());

    if let Some(timeout) = timeout {
        client = client.with_timeout(timeout).map_err(|e| e.to_string())?;
    }

    tracing::debug!(provider = provider_type.as_str(), base_url, "Created completion client");

    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_client() {
        let client = create_client("openai", None, Some("sk-test"), None).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_create_aipipe_with_timeout() {
        let client = create_client(
            "aipipe",
            Some("http://localhost:8080/v1"),
            Some("token"),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.provider_name(), "aipipe");
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client("openai", None, None, None) {
            Err(err) => assert!(err.contains("requires API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }

        assert!(create_client("openai", None, Some(""), None).is_err());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, Some("k"), None) {
            Err(err) => assert!(err.contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
