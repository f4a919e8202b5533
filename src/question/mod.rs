//! Canonical question records and the crawl aggregate
//!
//! A [`QuestionRecord`] is the unit of extracted data: one question with its
//! answer slots and correctness metadata. Records are created only by the
//! extractor and are immutable once appended to the [`QuestionBank`]; the
//! bank grows monotonically across the run and is reduced (never mutated)
//! by the output views.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One extracted question with its answer slots and correctness metadata
///
/// The serialized field names match the export schema consumed downstream
/// (the PDF renderers read `question`, not `question_text`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Topic identity; compares numerically for ordering even though stored
    /// as a string
    pub theme_id: String,

    /// Topic display name
    pub theme_name: String,

    /// 1-based position within the topic as encountered
    pub question_number: u32,

    /// Raw prompt string; may contain inline markup
    #[serde(rename = "question")]
    pub question_text: String,

    /// Answer-slot identifier ("1".."4") → answer text
    pub answers: BTreeMap<String, String>,

    /// Identifier of the correct slot; absent when undeterminable.
    /// When present it is always a key of `answers`.
    pub correct_answer: Option<String>,

    /// Denormalized copy of the correct slot's text
    pub correct_answer_text: Option<String>,

    /// Citation string; empty when the source has none
    #[serde(default)]
    pub article: String,
}

/// Numeric-first sort key for theme ids: "10" sorts after "2", and any
/// non-numeric id sorts after all numeric ones.
pub fn theme_order_key(theme_id: &str) -> (u64, String) {
    match theme_id.trim().parse::<u64>() {
        Ok(n) => (n, String::new()),
        Err(_) => (u64::MAX, theme_id.to_string()),
    }
}

/// The explicit crawl aggregate: every record extracted so far, in
/// encounter order.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Creates an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a bank from previously snapshotted records
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    /// Appends one unit's worth of extracted records
    pub fn append(&mut self, records: Vec<QuestionRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> QuestionRecord {
        let mut answers = BTreeMap::new();
        answers.insert("1".to_string(), "first".to_string());
        answers.insert("2".to_string(), "second".to_string());
        QuestionRecord {
            theme_id: "3".to_string(),
            theme_name: "Theme three".to_string(),
            question_number: 1,
            question_text: "Which one?".to_string(),
            answers,
            correct_answer: Some("2".to_string()),
            correct_answer_text: Some("second".to_string()),
            article: "art. 5".to_string(),
        }
    }

    #[test]
    fn test_serialized_field_names_match_export_schema() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json.get("question").is_some());
        assert!(json.get("question_text").is_none());
        assert_eq!(json["correct_answer"], "2");
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: QuestionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_missing_article_defaults_to_empty() {
        let json = r#"{
            "theme_id": "1",
            "theme_name": "T",
            "question_number": 1,
            "question": "Q",
            "answers": {"1": "a"},
            "correct_answer": null,
            "correct_answer_text": null
        }"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.article, "");
    }

    #[test]
    fn test_theme_order_key_is_numeric() {
        let mut ids = vec!["10", "2", "1"];
        ids.sort_by_key(|id| theme_order_key(id));
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_theme_order_key_non_numeric_sorts_last() {
        let mut ids = vec!["extra", "10", "2"];
        ids.sort_by_key(|id| theme_order_key(id));
        assert_eq!(ids, vec!["2", "10", "extra"]);
    }

    #[test]
    fn test_bank_appends_monotonically() {
        let mut bank = QuestionBank::new();
        assert!(bank.is_empty());
        bank.append(vec![sample_record()]);
        bank.append(vec![sample_record(), sample_record()]);
        assert_eq!(bank.len(), 3);
    }
}
