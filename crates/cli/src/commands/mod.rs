//! Command handlers for the tutor CLI.

pub mod ask;
pub mod merge;
pub mod serve;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use merge::MergeCommand;
pub use serve::ServeCommand;
pub use stats::StatsCommand;
