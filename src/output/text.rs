//! Human-readable transcript export
//!
//! One entry per record, numbered across the whole bank, with the correct
//! slot flagged. This is the quick-inspection format; the JSON export is
//! the one downstream renderers consume.

use crate::output::OutputResult;
use crate::question::QuestionRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the transcript for `records` to `path`
pub fn write_transcript(path: &Path, records: &[QuestionRecord]) -> OutputResult<()> {
    let text = format_transcript(records);

    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;

    Ok(())
}

/// Formats records as the transcript text
pub fn format_transcript(records: &[QuestionRecord]) -> String {
    let mut out = String::new();

    for (i, question) in records.iter().enumerate() {
        out.push_str(&format!("Question {}:\n", i + 1));
        out.push_str(&format!("Theme: {}\n", question.theme_name));
        out.push_str(&format!("Question: {}\n", question.question_text));
        out.push_str("Answers:\n");
        for (slot, text) in &question.answers {
            let marker = if question.correct_answer.as_deref() == Some(slot) {
                " ✓"
            } else {
                ""
            };
            out.push_str(&format!("  {}) {}{}\n", slot, text, marker));
        }
        out.push_str(&format!("Article: {}\n", question.article));
        out.push_str(&"-".repeat(80));
        out.push_str("\n\n");
    }

    out
}
