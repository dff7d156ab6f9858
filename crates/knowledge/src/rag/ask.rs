//! Retrieval-augmented answering.
//!
//! Linear per question: rank the corpus, take the top documents, build the
//! prompt, make one completion call, shape the reply. No retries.

use crate::base::{KnowledgeBase, SearchHit};
use crate::rag::types::{RagLink, RagOptions, RagResponse};
use std::collections::HashMap;
use tutor_core::AppResult;
use tutor_llm::{LlmClient, LlmRequest};
use tutor_prompt::{build_prompt, PromptDefinition};

/// Separator between documents in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Answer a question from the knowledge base.
///
/// Fails with `ContextNotLoaded` before any remote call when the knowledge
/// base has no index. Completion failures are returned as they are.
pub async fn ask(
    kb: &KnowledgeBase,
    client: &dyn LlmClient,
    prompt: &PromptDefinition,
    options: &RagOptions,
    question: &str,
) -> AppResult<RagResponse> {
    let hits = kb.search(question, options.retrieval.top_k)?;

    tracing::info!(
        "Answering with {} documents (top score: {:.3})",
        hits.len(),
        hits.first().map(|h| h.score).unwrap_or(0.0)
    );

    let context = build_context(&hits);

    let mut variables = HashMap::new();
    variables.insert("question".to_string(), question.to_string());
    variables.insert("context".to_string(), context);
    let built = build_prompt(prompt, variables)?;

    let mut request = LlmRequest::new(built.user, &options.model);
    if let Some(system) = built.system {
        request = request.with_system(system);
    }

    let response = client.complete(&request).await?;

    let links = hits
        .iter()
        .map(|hit| {
            RagLink::new(
                hit.document.url.clone(),
                &hit.document.text,
                options.retrieval.preview_chars,
            )
        })
        .collect();

    Ok(RagResponse {
        answer: response.content.trim().to_string(),
        links,
    })
}

/// Join the retrieved texts into the prompt context.
fn build_context(hits: &[SearchHit<'_>]) -> String {
    hits.iter()
        .map(|hit| hit.document.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
