//! Flat CSV export
//!
//! One row per record with fixed columns for tabular consumption:
//! `Theme, Question, Answer1..Answer4, Correct Answer, Article`.

use crate::output::views::flat_rows;
use crate::output::OutputResult;
use crate::question::QuestionRecord;
use csv::Writer;
use std::path::Path;

const HEADER: [&str; 8] = [
    "Theme",
    "Question",
    "Answer1",
    "Answer2",
    "Answer3",
    "Answer4",
    "Correct Answer",
    "Article",
];

/// Writes the flat CSV export for `records` to `path`
pub fn write_csv(path: &Path, records: &[QuestionRecord]) -> OutputResult<()> {
    let mut writer = Writer::from_path(path)?;

    writer.write_record(HEADER)?;
    for row in flat_rows(records) {
        writer.write_record([
            row.theme.as_str(),
            row.question.as_str(),
            row.answers[0].as_str(),
            row.answers[1].as_str(),
            row.answers[2].as_str(),
            row.answers[3].as_str(),
            row.correct_answer.as_str(),
            row.article.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn record_with_three_answers() -> QuestionRecord {
        let mut answers = BTreeMap::new();
        answers.insert("1".to_string(), "alpha".to_string());
        answers.insert("2".to_string(), "beta".to_string());
        answers.insert("3".to_string(), "gamma".to_string());
        QuestionRecord {
            theme_id: "1".to_string(),
            theme_name: "Some law".to_string(),
            question_number: 1,
            question_text: "Pick one".to_string(),
            answers,
            correct_answer: Some("3".to_string()),
            correct_answer_text: Some("gamma".to_string()),
            article: "art. 1".to_string(),
        }
    }

    #[test]
    fn test_csv_has_header_and_padded_answer_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &[record_with_three_answers()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Theme,Question,Answer1,Answer2,Answer3,Answer4,Correct Answer,Article"
        );
        // Answer4 is present as an empty field, not missing
        assert_eq!(
            lines.next().unwrap(),
            "Some law,Pick one,alpha,beta,gamma,,3,art. 1"
        );
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut record = record_with_three_answers();
        record.question_text = "First, second, or third?".to_string();
        write_csv(&path, &[record]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"First, second, or third?\""));
    }
}
