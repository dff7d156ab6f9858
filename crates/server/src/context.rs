//! Service context shared by every request.

use std::sync::Arc;
use std::time::Duration;
use tutor_core::{AppConfig, AppError, AppResult};
use tutor_knowledge::{KnowledgeBase, RagOptions};
use tutor_llm::{create_client, LlmClient};
use tutor_prompt::{load_prompt, PromptDefinition};

/// Everything a request needs, built once at startup.
///
/// Immutable after construction. Cloning only bumps reference counts, so the
/// router holds it as state and each handler gets its own handle.
#[derive(Clone)]
pub struct ServiceContext {
    pub knowledge: Arc<KnowledgeBase>,
    pub client: Arc<dyn LlmClient>,
    pub prompt: Arc<PromptDefinition>,
    pub options: Arc<RagOptions>,
}

impl ServiceContext {
    pub fn new(
        knowledge: KnowledgeBase,
        client: Arc<dyn LlmClient>,
        prompt: PromptDefinition,
        options: RagOptions,
    ) -> Self {
        Self {
            knowledge: Arc::new(knowledge),
            client,
            prompt: Arc::new(prompt),
            options: Arc::new(options),
        }
    }

    /// Build the context from configuration.
    ///
    /// The corpus file is allowed to be missing; the provider settings are not.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.validate_llm()?;

        let options = RagOptions::from_config(config)
            .ok_or_else(|| AppError::Config("Model not configured".to_string()))?;

        let client = create_client(
            &config.llm.provider,
            config.llm.base_url.as_deref(),
            config.llm.api_key.as_deref(),
            config.llm.timeout_secs.map(Duration::from_secs),
        )
        .map_err(AppError::Config)?;

        let prompt = load_prompt(&config.workspace, &config.llm.prompt_id)?;
        let knowledge = KnowledgeBase::load(&config.output_file());

        tracing::info!(
            documents = knowledge.len(),
            index_ready = knowledge.is_ready(),
            provider = client.provider_name(),
            model = %options.model,
            "Service context ready"
        );

        Ok(Self::new(knowledge, client, prompt, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_without_corpus_is_degraded() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig {
            workspace: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        config.llm.api_key = Some("sk-test".to_string());
        config.llm.model = Some("gpt-4o-mini".to_string());

        let ctx = ServiceContext::from_config(&config).unwrap();
        assert!(!ctx.knowledge.is_ready());
        assert_eq!(ctx.options.model, "gpt-4o-mini");
        assert_eq!(ctx.options.retrieval.top_k, 3);
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            workspace: dir.path().to_path_buf(),
            ..AppConfig::default()
        };

        assert!(matches!(
            ServiceContext::from_config(&config),
            Err(AppError::Config(_))
        ));
    }
}
