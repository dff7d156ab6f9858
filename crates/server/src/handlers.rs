//! Request handlers.
//!
//! Every outcome is an HTTP 200; failures travel in the `error` field.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tutor_knowledge::rag::{self, RagResponse};

use crate::context::ServiceContext;

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub documents: usize,
    pub index_ready: bool,
}

/// Question body.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,

    /// Base64 image; accepted and ignored
    #[serde(default)]
    pub image: Option<String>,
}

/// Answer or error, never both.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnswerPayload {
    Answer(RagResponse),
    Error { error: String },
}

/// `GET /`
pub async fn status(State(ctx): State<ServiceContext>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Answer service is running".to_string(),
        documents: ctx.knowledge.len(),
        index_ready: ctx.knowledge.is_ready(),
    })
}

/// `POST /api/`
pub async fn answer(
    State(ctx): State<ServiceContext>,
    Json(request): Json<QuestionRequest>,
) -> Json<AnswerPayload> {
    tracing::info!("Incoming question: {}", request.question);

    if let Some(image) = &request.image {
        tracing::debug!("Ignoring attached image ({} bytes)", image.len());
    }

    let result = rag::ask(
        &ctx.knowledge,
        ctx.client.as_ref(),
        &ctx.prompt,
        &ctx.options,
        &request.question,
    )
    .await;

    match result {
        Ok(response) => Json(AnswerPayload::Answer(response)),
        Err(e) => {
            tracing::error!("Answer failed: {:?}", e);
            Json(AnswerPayload::Error {
                error: e.to_string(),
            })
        }
    }
}
