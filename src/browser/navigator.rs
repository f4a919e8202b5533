//! Fixed-hierarchy navigation over the quiz site UI
//!
//! The site presents a three-level menu: a subject button on the entry page,
//! a topic menu, and a block menu with a quiz-start control. Elements are
//! re-queried by index on every selection: handles go stale across the
//! page's own re-renders, and a planned index that no longer resolves must
//! fail the unit instead of activating the wrong control.

use crate::browser::session::Session;
use crate::browser::traits::{Choice, SiteSession};
use crate::config::Config;
use crate::extract;
use crate::question::QuestionRecord;
use crate::{HarvestError, Result};
use async_trait::async_trait;
use std::time::Duration;

// Selectors are the observed page contract
const TOPIC_MENU: &str = "div.window-zakon-choice";
const TOPIC_BUTTON: &str = "div.but-zakons-table[data-zakon-num]";
const TOPIC_LABEL: &str = ".but-zakons-text";
const TOPIC_ID_ATTR: &str = "data-zakon-num";
const BLOCK_MENU: &str = "div.window-block-choice";
const BLOCK_BUTTON: &str = "div.but-blocks-table[data-block-num]";
const BLOCK_LABEL: &str = ".but-blocks-text";
const BLOCK_ID_ATTR: &str = "data-block-num";
const QUIZ_START: &str = "div.but-blocks-block-testing-table";

/// Drives the site's fixed menu hierarchy over one [`Session`]
pub struct Navigator {
    session: Session,
    entry_url: String,
    subject_selector: String,
    element_timeout: Duration,
    root_timeout: Duration,
    menu_pause: Duration,
    quiz_pause: Duration,
}

impl Navigator {
    pub fn new(session: Session, config: &Config) -> Self {
        Self {
            session,
            entry_url: config.site.entry_url.clone(),
            subject_selector: format!(
                "div.button-table[data-subject=\"{}\"]",
                config.site.subject
            ),
            element_timeout: Duration::from_millis(config.crawler.element_timeout_ms),
            root_timeout: Duration::from_millis(config.crawler.root_timeout_ms),
            menu_pause: Duration::from_millis(config.crawler.menu_pause_ms),
            quiz_pause: Duration::from_millis(config.crawler.quiz_pause_ms),
        }
    }

    /// Closes the underlying browser session
    pub async fn close(self) {
        self.session.close().await;
    }

    /// Reads (name, external id) off every element matching `button_selector`
    async fn list_choices(
        &self,
        button_selector: &str,
        label_selector: &str,
        id_attr: &str,
    ) -> Result<Vec<Choice>> {
        let mut choices = Vec::new();

        for element in self.session.find_all(button_selector).await {
            let name = match element.find_element(label_selector).await {
                Ok(label) => label.inner_text().await?.unwrap_or_default(),
                Err(_) => String::new(),
            };
            let external_id = element.attribute(id_attr).await?.unwrap_or_default();

            choices.push(Choice {
                name: name.trim().to_string(),
                external_id,
            });
        }

        Ok(choices)
    }

    /// Re-queries `selector` and force-clicks the element at `index`
    async fn click_nth(&self, selector: &str, index: usize) -> bool {
        let elements = self.session.find_all(selector).await;
        match elements.get(index) {
            Some(element) => self.session.force_click(element).await,
            None => {
                tracing::warn!(
                    "Element {} of {} no longer present ({} on page)",
                    index,
                    selector,
                    elements.len()
                );
                false
            }
        }
    }
}

#[async_trait]
impl SiteSession for Navigator {
    async fn goto_root(&mut self) -> Result<()> {
        tracing::debug!("Loading entry page {}", self.entry_url);
        self.session.goto(&self.entry_url).await?;
        self.session.pause(self.menu_pause).await;

        let subject = self
            .session
            .wait_for(&self.subject_selector, self.element_timeout)
            .await
            .ok_or_else(|| {
                HarvestError::Navigation(format!(
                    "subject control {} not present",
                    self.subject_selector
                ))
            })?;

        if !self.session.force_click(&subject).await {
            return Err(HarvestError::Navigation(
                "subject control would not activate".to_string(),
            ));
        }

        self.session
            .wait_for(TOPIC_MENU, self.root_timeout)
            .await
            .ok_or_else(|| HarvestError::Navigation("topic menu never appeared".to_string()))?;
        self.session.pause(self.menu_pause).await;

        Ok(())
    }

    async fn list_topics(&mut self) -> Result<Vec<Choice>> {
        self.list_choices(TOPIC_BUTTON, TOPIC_LABEL, TOPIC_ID_ATTR).await
    }

    async fn list_blocks(&mut self) -> Result<Vec<Choice>> {
        self.list_choices(BLOCK_BUTTON, BLOCK_LABEL, BLOCK_ID_ATTR).await
    }

    async fn select_topic(&mut self, index: usize) -> bool {
        if !self.click_nth(TOPIC_BUTTON, index).await {
            return false;
        }
        self.session.pause(self.menu_pause).await;
        self.session
            .wait_for(BLOCK_MENU, self.element_timeout)
            .await
            .is_some()
    }

    async fn select_block(&mut self, index: usize) -> bool {
        if !self.click_nth(BLOCK_BUTTON, index).await {
            return false;
        }
        self.session.pause(self.menu_pause).await;
        true
    }

    async fn start_quiz(&mut self) -> bool {
        match self.session.wait_for(QUIZ_START, self.element_timeout).await {
            Some(control) => {
                if !self.session.force_click(&control).await {
                    return false;
                }
                self.session.pause(self.quiz_pause).await;
                true
            }
            None => false,
        }
    }

    async fn extract(&mut self) -> Result<Vec<QuestionRecord>> {
        extract::extract_questions(&self.session).await
    }
}
