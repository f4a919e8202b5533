//! The navigation + extraction seam between the orchestrator and the browser
//!
//! The crawl orchestrator only ever talks to a [`SiteSession`]; the real
//! implementation drives Chrome, while tests drive a scripted fake.

use crate::question::QuestionRecord;
use crate::Result;
use async_trait::async_trait;

/// A visible topic or block choice in the site menu, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Display name of the choice
    pub name: String,

    /// The site's own identifier for the choice (`data-*` attribute value)
    pub external_id: String,
}

/// One browser session's view of the quiz site.
///
/// Selection methods return `false` on timeout or when the requested index
/// no longer resolves. Transient UI races are expected, and the caller
/// decides whether a failure is retryable or skip-worthy. Only `goto_root`
/// raises, because without the entry menu nothing else can proceed for this
/// unit.
#[async_trait]
pub trait SiteSession {
    /// Resets navigation to the entry page and drills into the subject menu
    async fn goto_root(&mut self) -> Result<()>;

    /// Enumerates the currently visible top-level topics
    async fn list_topics(&mut self) -> Result<Vec<Choice>>;

    /// Enumerates the blocks under the currently selected topic.
    ///
    /// Only meaningful after a successful `select_topic`.
    async fn list_blocks(&mut self) -> Result<Vec<Choice>>;

    /// Activates the topic at `index`; false if it is gone or won't activate
    async fn select_topic(&mut self, index: usize) -> bool;

    /// Activates the block at `index`; false if it is gone or won't activate
    async fn select_block(&mut self, index: usize) -> bool;

    /// Activates the quiz-start control for the selected block
    async fn start_quiz(&mut self) -> bool;

    /// Extracts the question bank from the current quiz page.
    ///
    /// An empty vec means no data was found (a unit failure, not an error).
    async fn extract(&mut self) -> Result<Vec<QuestionRecord>>;
}
