//! Document model shared by the merger, the index and the answer path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Course material (markdown)
    Course,
    /// Forum post from a Discourse export
    Discourse,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Discourse => "discourse",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One merged record. Immutable once written by the merger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub source: Source,

    /// Plain text; may be empty
    pub text: String,

    /// `file://` path for course material, post URL for forum posts
    pub url: String,
}

impl Document {
    pub fn course(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: Source::Course,
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn discourse(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: Source::Discourse,
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Outcome of one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    /// Markdown files converted
    pub course_count: usize,

    /// Forum posts extracted
    pub discourse_count: usize,

    /// Input files that could not be read or parsed
    pub skipped_files: usize,

    /// Records written
    pub total: usize,
}

/// Corpus composition, reported by `tutor stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub documents: usize,
    pub course_documents: usize,
    pub discourse_documents: usize,
    pub empty_documents: usize,
    pub vocabulary_size: usize,
    pub index_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wire_format() {
        let doc = Document::course("Hi\nWorld", "file://course/a.md");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"source": "course", "text": "Hi\nWorld", "url": "file://course/a.md"})
        );

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let result = serde_json::from_str::<Document>(r#"{"source":"wiki","text":"","url":"x"}"#);
        assert!(result.is_err());
    }
}
