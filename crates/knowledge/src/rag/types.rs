//! Answer types.

use serde::{Deserialize, Serialize};
use tutor_core::{AppConfig, RetrievalSettings};

/// Marker appended to every link preview.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// A source document shown with an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagLink {
    pub url: String,

    /// Leading characters of the document text followed by `...`
    pub text: String,
}

impl RagLink {
    /// Link with a preview of the first `preview_chars` characters.
    pub fn new(url: impl Into<String>, text: &str, preview_chars: usize) -> Self {
        let head: String = text.chars().take(preview_chars).collect();
        Self {
            url: url.into(),
            text: format!("{}{}", head.trim(), PREVIEW_ELLIPSIS),
        }
    }
}

/// A successful answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagResponse {
    /// Model reply, trimmed
    pub answer: String,

    /// One link per retrieved document, best first
    pub links: Vec<RagLink>,
}

/// Model and retrieval settings for one answer.
#[derive(Debug, Clone)]
pub struct RagOptions {
    /// Model identifier sent to the completion API
    pub model: String,

    pub retrieval: RetrievalSettings,
}

impl RagOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            retrieval: RetrievalSettings::default(),
        }
    }

    /// Options from configuration. `None` when no model is configured.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config.llm.model.as_ref().map(|model| Self {
            model: model.clone(),
            retrieval: config.retrieval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_is_truncated_by_characters() {
        let text = "é".repeat(250);
        let link = RagLink::new("file://a.md", &text, 100);
        assert_eq!(link.text.chars().count(), 103);
        assert!(link.text.ends_with("..."));
    }

    #[test]
    fn test_preview_is_trimmed() {
        let link = RagLink::new("u", "  short text \n", 100);
        assert_eq!(link.text, "short text...");

        let link = RagLink::new("u", "", 100);
        assert_eq!(link.text, "...");
    }

    #[test]
    fn test_response_wire_format() {
        let response = RagResponse {
            answer: "Use pd.read_csv.".to_string(),
            links: vec![RagLink::new("file://course/pandas.md", "Pandas basics", 100)],
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "answer": "Use pd.read_csv.",
                "links": [{"url": "file://course/pandas.md", "text": "Pandas basics..."}]
            })
        );
    }
}
