//! Route table.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::context::ServiceContext;
use crate::handlers;

/// Build the router. `/query/` is kept as an alias of `/api/`.
pub fn create_router(ctx: ServiceContext) -> Router {
    Router::new()
        .route("/", get(handlers::status))
        .route("/api", post(handlers::answer))
        .route("/api/", post(handlers::answer))
        .route("/query", post(handlers::answer))
        .route("/query/", post(handlers::answer))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tutor_core::{AppError, AppResult};
    use tutor_knowledge::{Document, KnowledgeBase, RagOptions};
    use tutor_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
    use tutor_prompt::default_prompt;

    struct MockClient {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl LlmClient for MockClient {
        fn provider_name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Llm("connection refused".to_string()));
            }
            Ok(LlmResponse {
                content: " Submit through the portal. ".to_string(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            })
        }
    }

    fn documents() -> Vec<Document> {
        vec![
            Document::course(
                "Project submissions go through the course portal before the deadline. "
                    .repeat(4),
                "file://data/course_content/project.md",
            ),
            Document::discourse(
                "Is the portal down? I cannot submit.",
                "https://forum.example.org/t/portal/10/2",
            ),
            Document::course("Python functions return values.", "file://data/course_content/py.md"),
            Document::discourse("Thanks, solved.", "https://forum.example.org/t/portal/10/3"),
        ]
    }

    fn server(documents: Vec<Document>, fail: bool) -> (TestServer, Arc<MockClient>) {
        let client = Arc::new(MockClient {
            fail,
            calls: AtomicUsize::new(0),
        });
        let ctx = ServiceContext::new(
            KnowledgeBase::from_documents(documents),
            client.clone(),
            default_prompt(),
            RagOptions::new("gpt-4o-mini"),
        );
        (TestServer::new(create_router(ctx)).unwrap(), client)
    }

    #[tokio::test]
    async fn test_status() {
        let (server, _) = server(documents(), false);
        let response = server.get("/").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "Answer service is running");
        assert_eq!(body["documents"], 4);
        assert_eq!(body["indexReady"], true);
    }

    #[tokio::test]
    async fn test_answer() {
        let (server, client) = server(documents(), false);
        let response = server
            .post("/api/")
            .json(&json!({"question": "When is the project deadline?", "image": null}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["answer"], "Submit through the portal.");
        assert!(body.get("error").is_none());

        let links = body["links"].as_array().unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0]["url"], "file://data/course_content/project.md");
        for link in links {
            let text = link["text"].as_str().unwrap();
            assert!(text.chars().count() <= 103);
            assert!(text.ends_with("..."));
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_query_alias_and_image_are_accepted() {
        let (server, _) = server(documents(), false);
        let response = server
            .post("/query/")
            .json(&json!({"question": "portal", "image": "aGVsbG8="}))
            .await;

        response.assert_status_ok();
        assert!(response.json::<Value>().get("answer").is_some());
    }

    #[tokio::test]
    async fn test_empty_corpus_reports_context_not_loaded() {
        let (server, client) = server(Vec::new(), false);
        let response = server
            .post("/api/")
            .json(&json!({"question": "anything"}))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Context data not loaded"})
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_completion_failure_is_an_error_body() {
        let (server, client) = server(documents(), true);
        let response = server
            .post("/api")
            .json(&json!({"question": "How do I submit the project?"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body.get("answer").is_none());
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }
}
