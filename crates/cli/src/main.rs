//! Tutor CLI
//!
//! Main entry point for the `tutor` command-line tool: merges course content,
//! serves the answer API and answers questions from the terminal.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, MergeCommand, ServeCommand, StatsCommand};
use std::path::PathBuf;
use tutor_core::{config::AppConfig, logging, AppResult};

/// Tutor - retrieval-augmented answers over course material and forum threads
#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(about = "Retrieval-augmented course teaching assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "TUTOR_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file (default: <workspace>/tutor.yaml)
    #[arg(short, long, global = true, env = "TUTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Model identifier
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Completion API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge course markdown and Discourse exports into the corpus file
    Merge(MergeCommand),

    /// Run the answer service
    Serve(ServeCommand),

    /// Answer one question from the terminal
    Ask(AskCommand),

    /// Show corpus statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load configuration: defaults, settings file, .env, environment
    let config = AppConfig::load_with(cli.workspace, cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.model,
        cli.base_url,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Tutor CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.llm.provider);

    let command_name = match &cli.command {
        Commands::Merge(_) => "merge",
        Commands::Serve(_) => "serve",
        Commands::Ask(_) => "ask",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Merge(cmd) => cmd.execute(&config),
        Commands::Serve(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
