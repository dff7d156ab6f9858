//! Loading the merged corpus file.

use crate::types::Document;
use std::path::Path;
use tutor_core::{AppError, AppResult};

/// Load the merged corpus, degrading to an empty corpus on any failure.
///
/// A missing, unreadable or malformed file is logged and never fatal: the
/// service then starts without an index.
pub fn load_corpus(path: &Path) -> Vec<Document> {
    match read_corpus(path) {
        Ok(documents) => {
            tracing::info!("Loaded {} documents from {:?}", documents.len(), path);
            documents
        }
        Err(e) => {
            tracing::error!("Corpus not loaded from {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Read and parse the corpus file, reporting failures.
pub fn read_corpus(path: &Path) -> AppResult<Vec<Document>> {
    if !path.exists() {
        return Err(AppError::Knowledge(format!(
            "{} not found. Run 'tutor merge' first.",
            path.display()
        )));
    }

    let contents = std::fs::read_to_string(path)?;
    let documents: Vec<Document> = serde_json::from_str(&contents)?;
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::write_documents;
    use tempfile::TempDir;

    #[test]
    fn test_load_written_corpus() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scraped_content.json");
        let docs = vec![
            Document::course("Week 1", "file://course/week1.md"),
            Document::discourse("", "https://forum.example.org/t/unknown/0/1"),
        ];
        write_documents(&path, &docs).unwrap();

        assert_eq!(load_corpus(&path), docs);
    }

    #[test]
    fn test_missing_file_is_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        assert!(load_corpus(&path).is_empty());
        let err = read_corpus(&path).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_file_is_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"source": "course"}"#).unwrap();

        assert!(load_corpus(&path).is_empty());
        assert!(matches!(
            read_corpus(&path),
            Err(AppError::Serialization(_))
        ));
    }
}
