//! Provider identification.

/// Known completion providers.
///
/// Every provider speaks the OpenAI chat-completion wire format; they differ
/// only in their default base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    OpenAI,
    AiPipe,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAI),
            "aipipe" | "ai-pipe" => Some(Self::AiPipe),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::AiPipe => "aipipe",
        }
    }

    /// Base URL used when none is configured.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => crate::providers::openai::DEFAULT_BASE_URL,
            Self::AiPipe => "https://aipipe.org/openrouter/v1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("openai"), Some(ProviderType::OpenAI));
        assert_eq!(ProviderType::parse("OpenAI"), Some(ProviderType::OpenAI));
        assert_eq!(ProviderType::parse("aipipe"), Some(ProviderType::AiPipe));
        assert_eq!(ProviderType::parse("ollama"), None);
    }

    #[test]
    fn test_default_base_urls() {
        assert_eq!(
            ProviderType::OpenAI.default_base_url(),
            "https://api.openai.com/v1"
        );
        assert!(ProviderType::AiPipe.default_base_url().contains("aipipe.org"));
    }
}
