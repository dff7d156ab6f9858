//! Retrieval-augmented answering over the course corpus.

pub mod ask;
pub mod types;

pub use ask::{ask, CONTEXT_SEPARATOR};
pub use types::{RagLink, RagOptions, RagResponse};
