//! Quiz-Harvest: a resumable quiz-bank harvester
//!
//! This crate drives a single browser session through a quiz site's fixed
//! topic → block → quiz hierarchy, extracts the question bank embedded in each
//! quiz page, and persists the results with restartable progress tracking so
//! an interrupted run picks up where it left off.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod question;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for quiz-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Browser session could not be launched: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true if this failure is local to one work unit.
    ///
    /// Recoverable failures mark the unit Failed and let the crawl continue;
    /// everything else is treated as session-fatal and propagates.
    pub fn is_unit_recoverable(&self) -> bool {
        matches!(self, Self::Navigation(_) | Self::Extraction(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for quiz-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use question::{QuestionBank, QuestionRecord};
pub use state::UnitState;
