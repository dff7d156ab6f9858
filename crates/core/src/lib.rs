//! Tutor Core Library
//!
//! Foundational utilities shared by the tutor crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, RetrievalSettings};
pub use error::{AppError, AppResult};
