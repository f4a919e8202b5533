//! Pure reductions over the accumulated question bank
//!
//! All three views are pure functions of the record slice; the bank is
//! never mutated by a renderer. Downstream document renderers consume these
//! shapes (and the raw JSON export) to lay out print documents.

use crate::question::{theme_order_key, QuestionRecord};
use std::collections::HashMap;

/// Questions of one theme, in question-number order
#[derive(Debug, Clone)]
pub struct ThemeGroup<'a> {
    pub theme_id: &'a str,
    pub theme_name: &'a str,
    pub questions: Vec<&'a QuestionRecord>,
}

/// One deduplicated question with the union of correct answers seen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKeyEntry {
    pub question_text: String,

    /// Correct-answer texts in first-seen order, no repeats. The same
    /// question text can appear with different correct slots across source
    /// variants, so this is a list.
    pub correct_answers: Vec<String>,
}

/// The deduplicated answer key for one theme
#[derive(Debug, Clone)]
pub struct ThemeAnswerKey {
    pub theme_id: String,
    pub theme_name: String,
    pub entries: Vec<AnswerKeyEntry>,
}

/// One row of the flat export; always exactly four answer columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub theme: String,
    pub question: String,
    pub answers: [String; 4],
    pub correct_answer: String,
    pub article: String,
}

/// Full listing: all records grouped by theme in numeric theme-id order,
/// question-number order within each theme
pub fn group_by_theme(records: &[QuestionRecord]) -> Vec<ThemeGroup<'_>> {
    let mut groups: Vec<ThemeGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let at = *index.entry(record.theme_id.as_str()).or_insert_with(|| {
            groups.push(ThemeGroup {
                theme_id: &record.theme_id,
                theme_name: &record.theme_name,
                questions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[at].questions.push(record);
    }

    groups.sort_by_key(|g| theme_order_key(g.theme_id));
    for group in &mut groups {
        group.questions.sort_by_key(|q| q.question_number);
    }

    groups
}

/// Deduplicated answer key: per theme, questions merged by exact text with
/// their correct-answer texts unioned in first-seen order
pub fn dedup_answer_key(records: &[QuestionRecord]) -> Vec<ThemeAnswerKey> {
    group_by_theme(records)
        .into_iter()
        .map(|group| {
            let mut entries: Vec<AnswerKeyEntry> = Vec::new();
            let mut by_text: HashMap<&str, usize> = HashMap::new();

            for question in &group.questions {
                let at = *by_text
                    .entry(question.question_text.as_str())
                    .or_insert_with(|| {
                        entries.push(AnswerKeyEntry {
                            question_text: question.question_text.clone(),
                            correct_answers: Vec::new(),
                        });
                        entries.len() - 1
                    });

                if let Some(text) = &question.correct_answer_text {
                    if !entries[at].correct_answers.contains(text) {
                        entries[at].correct_answers.push(text.clone());
                    }
                }
            }

            ThemeAnswerKey {
                theme_id: group.theme_id.to_string(),
                theme_name: group.theme_name.to_string(),
                entries,
            }
        })
        .collect()
}

/// Flat export: one row per record in encounter order, four positional
/// answer columns (missing slots are empty strings, never absent)
pub fn flat_rows(records: &[QuestionRecord]) -> Vec<FlatRow> {
    records
        .iter()
        .map(|record| {
            let mut answers: [String; 4] = Default::default();
            for (i, answer) in answers.iter_mut().enumerate() {
                if let Some(text) = record.answers.get(&(i + 1).to_string()) {
                    *answer = text.clone();
                }
            }

            FlatRow {
                theme: record.theme_name.clone(),
                question: record.question_text.clone(),
                answers,
                correct_answer: record.correct_answer.clone().unwrap_or_default(),
                article: record.article.clone(),
            }
        })
        .collect()
}
