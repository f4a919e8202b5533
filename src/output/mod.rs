//! Output module for exports and the run report
//!
//! This module handles:
//! - Pure reductions over the accumulated question bank (grouped listing,
//!   deduplicated answer key, flat rows)
//! - Writing the JSON, transcript, and CSV export files
//! - The end-of-run report

mod csv_export;
mod stats;
mod text;
mod views;

pub use csv_export::write_csv;
pub use stats::{print_report, CrawlReport};
pub use text::{format_transcript, write_transcript};
pub use views::{
    dedup_answer_key, flat_rows, group_by_theme, AnswerKeyEntry, FlatRow, ThemeAnswerKey,
    ThemeGroup,
};

use crate::config::OutputConfig;
use crate::question::QuestionBank;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the full export set: JSON array, transcript, and flat CSV.
///
/// A bank with nothing in it writes nothing rather than shipping
/// empty files over whatever a previous run produced.
pub fn write_outputs(output: &OutputConfig, bank: &QuestionBank) -> OutputResult<()> {
    if bank.is_empty() {
        tracing::warn!("No questions collected, skipping export files");
        return Ok(());
    }

    let json = serde_json::to_string_pretty(bank.records())?;
    std::fs::write(&output.json_path, json)?;

    write_transcript(Path::new(&output.transcript_path), bank.records())?;
    write_csv(Path::new(&output.csv_path), bank.records())?;

    tracing::info!(
        "Exports written: {}, {}, {}",
        output.json_path,
        output.transcript_path,
        output.csv_path
    );

    Ok(())
}
