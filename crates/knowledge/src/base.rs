//! The knowledge base: corpus plus its similarity index.

use crate::corpus::load_corpus;
use crate::index::SimilarityIndex;
use crate::types::{CorpusStats, Document, Source};
use std::path::Path;
use tutor_core::{AppError, AppResult};

/// A retrieved document and its score.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    /// Position in the corpus
    pub position: usize,
    pub score: f64,
    pub document: &'a Document,
}

/// Corpus and index, built once and never mutated.
///
/// Shared across requests behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    documents: Vec<Document>,
    index: Option<SimilarityIndex>,
}

impl KnowledgeBase {
    /// Load the merged corpus file and build the index.
    ///
    /// A missing or broken file gives an empty knowledge base that reports
    /// [`AppError::ContextNotLoaded`] on every search.
    pub fn load(corpus_path: &Path) -> Self {
        Self::from_documents(load_corpus(corpus_path))
    }

    /// Build the index over already loaded documents.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let index = if documents.is_empty() {
            tracing::warn!("Empty corpus; similarity index not built");
            None
        } else {
            let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
            SimilarityIndex::fit(&texts)
        };

        Self { documents, index }
    }

    /// Whether questions can be answered.
    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The `k` documents most similar to the question.
    pub fn search(&self, question: &str, k: usize) -> AppResult<Vec<SearchHit<'_>>> {
        let index = self.index.as_ref().ok_or(AppError::ContextNotLoaded)?;

        let hits = index
            .top_k(question, k)
            .into_iter()
            .map(|hit| SearchHit {
                position: hit.index,
                score: hit.score,
                document: &self.documents[hit.index],
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Retrieved {} documents (scores: {:?})",
            hits.len(),
            hits.iter().map(|h| h.score).collect::<Vec<_>>()
        );

        Ok(hits)
    }

    /// Corpus composition.
    pub fn stats(&self) -> CorpusStats {
        let count = |source: Source| self.documents.iter().filter(|d| d.source == source).count();

        CorpusStats {
            documents: self.documents.len(),
            course_documents: count(Source::Course),
            discourse_documents: count(Source::Discourse),
            empty_documents: self
                .documents
                .iter()
                .filter(|d| d.text.trim().is_empty())
                .count(),
            vocabulary_size: self
                .index
                .as_ref()
                .map(SimilarityIndex::vocabulary_size)
                .unwrap_or(0),
            index_ready: self.is_ready(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KnowledgeBase {
        KnowledgeBase::from_documents(vec![
            Document::course("Linear regression fits a line to data.", "file://c/regression.md"),
            Document::discourse(
                "The project submission portal closes at midnight.",
                "https://forum.example.org/t/project/1/1",
            ),
            Document::discourse("", "https://forum.example.org/t/empty/2/1"),
            Document::course("Vector databases store embeddings.", "file://c/vectors.md"),
        ])
    }

    #[test]
    fn test_empty_knowledge_base_is_not_ready() {
        let kb = KnowledgeBase::from_documents(Vec::new());
        assert!(!kb.is_ready());
        assert!(matches!(kb.search("anything", 3), Err(AppError::ContextNotLoaded)));
    }

    #[test]
    fn test_missing_corpus_file_is_not_ready() {
        let kb = KnowledgeBase::load(Path::new("/definitely/not/here.json"));
        assert!(kb.is_empty());
        assert!(!kb.is_ready());
    }

    #[test]
    fn test_search_returns_documents() {
        let kb = sample();
        let hits = kb.search("When does the project submission close?", 3).unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].position, 1);
        assert_eq!(hits[0].document.url, "https://forum.example.org/t/project/1/1");
    }

    #[test]
    fn test_stored_text_ranks_first() {
        let kb = sample();
        let text = kb.documents()[3].text.clone();
        let hits = kb.search(&text, 3).unwrap();
        assert_eq!(hits[0].position, 3);
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.documents, 4);
        assert_eq!(stats.course_documents, 2);
        assert_eq!(stats.discourse_documents, 2);
        assert_eq!(stats.empty_documents, 1);
        assert!(stats.vocabulary_size > 0);
        assert!(stats.index_ready);
    }
}
