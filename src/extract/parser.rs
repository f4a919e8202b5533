//! Normalization of the raw in-page bank object into canonical records
//!
//! Observed layout of the bank global:
//!
//! ```json
//! {
//!   "questions": {
//!     "<theme_id>": [
//!       { "question": "...", "reply1": "...", "reply2": "...",
//!         "correctly": 2, "statya": "art. 5" },
//!       ...
//!     ]
//!   },
//!   "zakon_names": { "<theme_id>": "<display name>" }
//! }
//! ```
//!
//! Per-question keys are heterogeneous: the numbered `reply` fields vary in
//! count, `correctly` may be a number or a string, and `statya` may be absent.

use crate::question::QuestionRecord;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parses the bank object into question records.
///
/// Tolerant by design: malformed themes or questions are skipped, and a
/// correctness indicator that names no real answer slot leaves
/// `correct_answer` absent rather than failing the extraction.
pub fn parse_bank(bank: &Value) -> Vec<QuestionRecord> {
    let mut records = Vec::new();

    let Some(themes) = bank.get("questions").and_then(Value::as_object) else {
        return records;
    };
    let names = bank.get("zakon_names").and_then(Value::as_object);

    for (theme_id, theme_questions) in themes {
        let theme_name = names
            .and_then(|n| n.get(theme_id))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Theme {}", theme_id));

        let Some(items) = theme_questions.as_array() else {
            continue;
        };

        for (i, item) in items.iter().enumerate() {
            let Some(fields) = item.as_object() else {
                continue;
            };

            let question_text = fields
                .get("question")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            let mut answers = BTreeMap::new();
            for (key, value) in fields {
                if let Some(slot) = key.strip_prefix("reply") {
                    if let Some(text) = value.as_str() {
                        answers.insert(slot.to_string(), text.to_string());
                    }
                }
            }

            // The indicator is only honored when it names a real slot
            let correct_answer = fields
                .get("correctly")
                .and_then(slot_id)
                .filter(|slot| answers.contains_key(slot));
            let correct_answer_text = correct_answer.as_ref().map(|slot| answers[slot].clone());

            let article = fields
                .get("statya")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            records.push(QuestionRecord {
                theme_id: theme_id.clone(),
                theme_name: theme_name.clone(),
                question_number: (i + 1) as u32,
                question_text,
                answers,
                correct_answer,
                correct_answer_text,
                article,
            });
        }
    }

    records
}

/// Reads an answer-slot identifier that may arrive as a string or a number
fn slot_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_bank() -> Value {
        json!({
            "questions": {
                "2": [
                    {
                        "question": "First question?",
                        "reply1": "alpha",
                        "reply2": "beta",
                        "reply3": "gamma",
                        "correctly": 2,
                        "statya": "art. 10"
                    },
                    {
                        "question": "Second question?",
                        "reply1": "yes",
                        "reply2": "no",
                        "correctly": "1"
                    }
                ]
            },
            "zakon_names": { "2": "Civil service law" }
        })
    }

    #[test]
    fn test_parse_basic_bank() {
        let records = parse_bank(&sample_bank());
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.theme_id, "2");
        assert_eq!(first.theme_name, "Civil service law");
        assert_eq!(first.question_number, 1);
        assert_eq!(first.question_text, "First question?");
        assert_eq!(first.answers.len(), 3);
        assert_eq!(first.answers["2"], "beta");
        assert_eq!(first.article, "art. 10");

        let second = &records[1];
        assert_eq!(second.question_number, 2);
        assert_eq!(second.article, "");
    }

    #[test]
    fn test_numeric_and_string_indicators_both_resolve() {
        let records = parse_bank(&sample_bank());

        assert_eq!(records[0].correct_answer.as_deref(), Some("2"));
        assert_eq!(records[0].correct_answer_text.as_deref(), Some("beta"));

        assert_eq!(records[1].correct_answer.as_deref(), Some("1"));
        assert_eq!(records[1].correct_answer_text.as_deref(), Some("yes"));
    }

    #[test]
    fn test_answer_key_invariant() {
        for record in parse_bank(&sample_bank()) {
            if let Some(slot) = &record.correct_answer {
                assert!(record.answers.contains_key(slot));
                assert_eq!(
                    record.correct_answer_text.as_deref(),
                    Some(record.answers[slot].as_str())
                );
            }
        }
    }

    #[test]
    fn test_non_matching_indicator_leaves_correct_absent() {
        let bank = json!({
            "questions": {
                "1": [
                    { "question": "Q", "reply1": "a", "reply2": "b", "correctly": 5 }
                ]
            }
        });
        let records = parse_bank(&bank);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].correct_answer, None);
        assert_eq!(records[0].correct_answer_text, None);
    }

    #[test]
    fn test_missing_indicator_leaves_correct_absent() {
        let bank = json!({
            "questions": {
                "1": [ { "question": "Q", "reply1": "a" } ]
            }
        });
        let records = parse_bank(&bank);
        assert_eq!(records[0].correct_answer, None);
    }

    #[test]
    fn test_missing_theme_name_gets_placeholder() {
        let bank = json!({
            "questions": { "7": [ { "question": "Q", "reply1": "a" } ] }
        });
        let records = parse_bank(&bank);
        assert_eq!(records[0].theme_name, "Theme 7");
    }

    #[test]
    fn test_bank_without_questions_is_empty() {
        assert!(parse_bank(&json!({})).is_empty());
        assert!(parse_bank(&json!({"questions": 3})).is_empty());
    }

    #[test]
    fn test_non_object_questions_skipped() {
        let bank = json!({
            "questions": {
                "1": [ "not an object", { "question": "Q", "reply1": "a" } ]
            }
        });
        let records = parse_bank(&bank);
        assert_eq!(records.len(), 1);
        // Position within the topic counts the skipped entry
        assert_eq!(records[0].question_number, 2);
    }
}
