//! Ask command handler.
//!
//! Answers one question the same way the service does, without HTTP.

use clap::Args;
use tutor_core::{config::AppConfig, AppError, AppResult};
use tutor_knowledge::rag;
use tutor_server::ServiceContext;

/// Answer a question from the terminal
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output the service response body as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Question: {}", self.question);

        let ctx = ServiceContext::from_config(config)?;

        let result = rag::ask(
            &ctx.knowledge,
            ctx.client.as_ref(),
            &ctx.prompt,
            &ctx.options,
            &self.question,
        )
        .await;

        if self.json {
            let output = match &result {
                Ok(response) => serde_json::to_value(response)?,
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
            return result.map(|_| ());
        }

        let response = result?;
        println!("{}", response.answer);

        if !response.links.is_empty() {
            println!();
            println!("Sources:");
            for (i, link) in response.links.iter().enumerate() {
                println!("  [{}] {}", i + 1, link.url);
                println!("      {}", link.text);
            }
        }

        Ok(())
    }
}
