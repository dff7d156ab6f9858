//! Stats command handler.
//!
//! Shows what the service would load from the corpus file.

use clap::Args;
use tutor_core::{config::AppConfig, AppResult};
use tutor_knowledge::KnowledgeBase;

/// Show corpus statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let corpus = config.output_file();
        let stats = KnowledgeBase::load(&corpus).stats();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("Corpus: {}", corpus.display());
            println!("Documents: {}", stats.documents);
            println!("  course:    {}", stats.course_documents);
            println!("  discourse: {}", stats.discourse_documents);
            println!("  empty:     {}", stats.empty_documents);
            println!("Vocabulary: {} terms", stats.vocabulary_size);
            println!(
                "Index: {}",
                if stats.index_ready { "ready" } else { "not built" }
            );
        }

        Ok(())
    }
}
