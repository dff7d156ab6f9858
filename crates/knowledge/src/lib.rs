//! Course knowledge: content merging, corpus loading, lexical retrieval and
//! retrieval-augmented answers.
//!
//! The merger turns course markdown and Discourse exports into one JSON
//! array of [`Document`]s. The answer side loads that array into a
//! [`KnowledgeBase`], ranks documents by TF-IDF cosine similarity and sends
//! the best ones as context to the completion API.

pub mod base;
pub mod corpus;
pub mod discourse;
pub mod index;
pub mod merge;
pub mod parser;
pub mod progress;
pub mod rag;
pub mod stopwords;
pub mod types;

// Re-export commonly used types
pub use base::{KnowledgeBase, SearchHit};
pub use corpus::load_corpus;
pub use index::SimilarityIndex;
pub use merge::{merge, MergeOptions};
pub use progress::{ProgressEvent, ProgressReporter};
pub use rag::{RagLink, RagOptions, RagResponse};
pub use types::{CorpusStats, Document, MergeStats, Source};
