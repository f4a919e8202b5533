//! Embedded question-bank extraction
//!
//! Quiz pages keep their whole question bank in a page-global JavaScript
//! object. The primary strategy reads that global directly via script
//! evaluation; when the page has not assigned it yet (or the read is
//! blocked), the fallback fetches the rendered HTML and scans inline
//! `<script>` text for the assignment, parsing the captured literal.
//!
//! An empty result means "no data found on this page" and is the unit
//! failure signal; it is never an error.

mod parser;

pub use parser::parse_bank;

use crate::browser::Session;
use crate::question::QuestionRecord;
use crate::Result;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

/// JS expression serializing the in-page bank global, or null when absent
const BANK_PROBE: &str = r#"(() => {
    if (typeof testobj !== 'undefined') {
        return JSON.stringify(testobj);
    }
    return null;
})()"#;

/// Extracts all question records from the currently rendered quiz page
pub async fn extract_questions(session: &Session) -> Result<Vec<QuestionRecord>> {
    if let Some(bank) = probe_page_global(session).await {
        tracing::debug!("Question bank read from page global");
        return Ok(parse_bank(&bank));
    }

    let html = session.html().await?;
    if let Some(bank) = scan_script_text(&html) {
        tracing::debug!("Question bank recovered from inline script text");
        return Ok(parse_bank(&bank));
    }

    tracing::debug!("No question bank found on page");
    Ok(Vec::new())
}

/// Primary strategy: evaluate the bank global inside the page
async fn probe_page_global(session: &Session) -> Option<Value> {
    let value = session.eval_value(BANK_PROBE).await?;
    let text = value.as_str()?;
    serde_json::from_str(text).ok()
}

/// Fallback strategy: find `testobj = {...};` inside an inline script and
/// parse the captured literal as JSON
fn scan_script_text(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);
    let scripts = Selector::parse("script").ok()?;
    let assignment = Regex::new(r"testobj\s*=\s*(\{[\s\S]*?\});").ok()?;

    for script in document.select(&scripts) {
        let text: String = script.text().collect();
        if let Some(caps) = assignment.captures(&text) {
            match serde_json::from_str(&caps[1]) {
                Ok(bank) => return Some(bank),
                Err(e) => {
                    tracing::debug!("Inline bank literal did not parse as JSON: {}", e);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_assignment_in_script() {
        let html = r#"<html><head>
            <script>var other = 1;</script>
            <script>
                window.setup();
                testobj = {"questions": {"1": []}, "zakon_names": {"1": "Law one"}};
                window.run(testobj);
            </script>
        </head><body></body></html>"#;

        let bank = scan_script_text(html).expect("assignment not found");
        assert!(bank.get("questions").is_some());
        assert_eq!(bank["zakon_names"]["1"], "Law one");
    }

    #[test]
    fn test_scan_without_assignment_is_none() {
        let html = "<html><head><script>var x = 2;</script></head><body></body></html>";
        assert!(scan_script_text(html).is_none());
    }

    #[test]
    fn test_scan_ignores_unparsable_literal() {
        // A JS object literal with unquoted keys is not JSON
        let html = "<html><script>testobj = {questions: bad};</script></html>";
        assert!(scan_script_text(html).is_none());
    }
}
