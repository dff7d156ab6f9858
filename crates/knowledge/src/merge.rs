//! Content merger.
//!
//! Walks the course tree and the discourse tree, converts everything to
//! plain-text [`Document`]s and writes them as one JSON array. Every run
//! rescans both trees and overwrites the output.

use crate::discourse::parse_export;
use crate::parser::{html_to_text, markdown_to_text};
use crate::progress::ProgressReporter;
use crate::types::{Document, MergeStats};
use std::path::{Path, PathBuf};
use tutor_core::{AppConfig, AppError, AppResult};
use walkdir::WalkDir;

/// Inputs and output of a merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub course_dir: PathBuf,
    pub discourse_dir: PathBuf,
    pub output_file: PathBuf,
    pub discourse_base_url: String,
}

impl MergeOptions {
    /// Paths from configuration, resolved against the workspace.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            course_dir: config.course_dir(),
            discourse_dir: config.discourse_dir(),
            output_file: config.output_file(),
            discourse_base_url: config.data.discourse_base_url.clone(),
        }
    }
}

/// Run a full merge and write the output file.
pub fn merge(options: &MergeOptions, progress: &ProgressReporter) -> AppResult<MergeStats> {
    tracing::info!(
        course_dir = ?options.course_dir,
        discourse_dir = ?options.discourse_dir,
        "Loading content"
    );

    let mut skipped = 0usize;

    let course = load_course_documents(&options.course_dir, progress, &mut skipped);
    progress.course_loaded(course.len());

    let discourse = load_discourse_documents(
        &options.discourse_dir,
        &options.discourse_base_url,
        progress,
        &mut skipped,
    );
    progress.discourse_loaded(discourse.len());

    let stats = MergeStats {
        course_count: course.len(),
        discourse_count: discourse.len(),
        skipped_files: skipped,
        total: course.len() + discourse.len(),
    };

    let mut merged = course;
    merged.extend(discourse);

    write_documents(&options.output_file, &merged)?;
    progress.written(stats.total, &options.output_file.display().to_string());

    tracing::info!(
        total = stats.total,
        skipped = stats.skipped_files,
        "Merge complete"
    );

    Ok(stats)
}

/// Convert every `.md` file under `dir` into a course document.
///
/// Unreadable files are logged, counted in `skipped` and left out.
pub fn load_course_documents(
    dir: &Path,
    progress: &ProgressReporter,
    skipped: &mut usize,
) -> Vec<Document> {
    let mut documents = Vec::new();

    for path in walk_files(dir, "md") {
        match std::fs::read_to_string(&path) {
            Ok(markdown) => {
                let url = format!("file://{}", path.display());
                documents.push(Document::course(markdown_to_text(&markdown), url));
            }
            Err(e) => {
                *skipped += 1;
                tracing::warn!("Skipping {:?}: {}", path, e);
                progress.skipped(*skipped, &display_name(&path), &e.to_string());
            }
        }
    }

    documents
}

/// Extract every post from every `.json` file under `dir`.
///
/// A file that cannot be read or parsed is logged, counted in `skipped` and
/// left out; the remaining files are still processed.
pub fn load_discourse_documents(
    dir: &Path,
    base_url: &str,
    progress: &ProgressReporter,
    skipped: &mut usize,
) -> Vec<Document> {
    let mut documents = Vec::new();

    for path in walk_files(dir, "json") {
        match read_discourse_file(&path, base_url) {
            Ok(posts) => {
                tracing::debug!("{} posts from {:?}", posts.len(), path);
                documents.extend(posts);
            }
            Err(e) => {
                *skipped += 1;
                tracing::warn!("Skipping {:?}: {}", path, e);
                progress.skipped(*skipped, &display_name(&path), &e.to_string());
            }
        }
    }

    documents
}

fn read_discourse_file(path: &Path, base_url: &str) -> AppResult<Vec<Document>> {
    let contents = std::fs::read_to_string(path)?;
    let posts = parse_export(&contents)?;

    Ok(posts
        .iter()
        .map(|post| Document::discourse(html_to_text(post.body()), post.url(base_url)))
        .collect())
}

/// Write documents as a pretty-printed JSON array, replacing the file.
pub fn write_documents(path: &Path, documents: &[Document]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Ingest(format!("Failed to create {:?}: {}", parent, e))
        })?;
    }

    let json = serde_json::to_string_pretty(documents)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::Ingest(format!("Failed to write {:?}: {}", path, e)))?;

    Ok(())
}

/// Files under `dir` with the given extension, in file-name order.
fn walk_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.exists() {
        tracing::warn!("Input directory does not exist: {:?}", dir);
        return Vec::new();
    }

    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Failed to walk {:?}: {}", dir, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
