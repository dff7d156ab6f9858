//! Merge command handler.
//!
//! Rebuilds the corpus file from the course and discourse trees.

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tutor_core::{config::AppConfig, AppResult};
use tutor_knowledge::{merge, MergeOptions, ProgressEvent, ProgressReporter};

/// Merge course content and forum exports
#[derive(Args, Debug)]
pub struct MergeCommand {
    /// Course markdown directory (default: data/course_content)
    #[arg(long)]
    pub course_dir: Option<PathBuf>,

    /// Discourse JSON directory (default: data/discourse)
    #[arg(long)]
    pub discourse_dir: Option<PathBuf>,

    /// Output file (default: data/scraped_content.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl MergeCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing merge command");

        let mut options = MergeOptions::from_config(config);
        if let Some(dir) = &self.course_dir {
            options.course_dir = dir.clone();
        }
        if let Some(dir) = &self.discourse_dir {
            options.discourse_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            options.output_file = output.clone();
        }

        let progress = ProgressReporter::new(Arc::new(|event: ProgressEvent| {
            println!("{}", event.format_simple());
        }));

        let stats = merge(&options, &progress)?;

        if stats.skipped_files > 0 {
            println!("Skipped {} unreadable files", stats.skipped_files);
        }

        Ok(())
    }
}
