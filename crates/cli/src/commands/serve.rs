//! Serve command handler.

use clap::Args;
use tutor_core::{config::AppConfig, AppResult};
use tutor_server::{run_server, ServiceContext};

/// Run the answer service
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Address to bind (default: 0.0.0.0:8000)
    #[arg(short, long, env = "TUTOR_BIND")]
    pub bind: Option<String>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing serve command");

        let ctx = ServiceContext::from_config(config)?;
        let bind = self.bind.as_deref().unwrap_or(&config.server.bind);

        run_server(ctx, bind).await
    }
}
