//! Chrome session wrapper
//!
//! Wraps one chromiumoxide browser + page pair and exposes the handful of
//! primitives the navigator needs: navigation, element lookup, bounded
//! waits, forced clicks, and script evaluation. All waits are polling with
//! a deadline; a timeout is a `None`/`false` result, never a hang.

use crate::config::{BrowserSettings, CrawlerConfig};
use crate::{HarvestError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Element;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

/// Poll interval for bounded element waits
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Script run after each navigation to look like a regular visitor
const WEBDRIVER_MASK: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// One live Chrome session
pub struct Session {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    settle: Duration,
}

impl Session {
    /// Launches Chrome and opens a blank page.
    ///
    /// # Arguments
    ///
    /// * `settings` - Window size from config
    /// * `crawler` - Pacing config (settle interval for forced clicks)
    /// * `headless` - Effective headless flag (config plus CLI override)
    pub async fn launch(
        settings: &BrowserSettings,
        crawler: &CrawlerConfig,
        headless: bool,
    ) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.window_width, settings.window_height)
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled");

        if !headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(HarvestError::Launch)?;
        let (browser, mut handler) = Browser::launch(config).await?;

        // Drain CDP events for the lifetime of the session
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        tracing::info!(
            "Browser session started ({})",
            if headless { "headless" } else { "headed" }
        );

        Ok(Self {
            browser,
            page,
            handler,
            settle: Duration::from_millis(crawler.settle_ms),
        })
    }

    /// Navigates to `url` and waits for the load to finish
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        // Best-effort; the page works without it
        let _ = self.page.evaluate(WEBDRIVER_MASK).await;
        Ok(())
    }

    /// Returns all elements currently matching `selector`, in DOM order
    pub async fn find_all(&self, selector: &str) -> Vec<Element> {
        self.page.find_elements(selector).await.unwrap_or_default()
    }

    /// Bounded polling wait for `selector` to appear.
    ///
    /// Returns None when the deadline passes without a match.
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Option<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Some(element);
            }
            if Instant::now() >= deadline {
                tracing::debug!("Element not found within timeout: {}", selector);
                return None;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Forced activation: clicks via injected script so overlays and
    /// animations can't block the control, then waits the settle interval.
    pub async fn force_click(&self, element: &Element) -> bool {
        match element
            .call_js_fn("function() { this.click(); }", false)
            .await
        {
            Ok(_) => {
                sleep(self.settle).await;
                true
            }
            Err(e) => {
                tracing::debug!("Forced click failed: {}", e);
                false
            }
        }
    }

    /// Evaluates a JS expression in the page, returning its JSON value
    pub async fn eval_value(&self, script: &str) -> Option<serde_json::Value> {
        match self.page.evaluate(script).await {
            Ok(result) => result.value().cloned(),
            Err(e) => {
                tracing::debug!("Script evaluation failed: {}", e);
                None
            }
        }
    }

    /// Returns the current page HTML
    pub async fn html(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    /// Sleeps for a fixed pacing interval
    pub async fn pause(&self, interval: Duration) {
        sleep(interval).await;
    }

    /// Closes the browser and stops the event drain
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close failed: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        tracing::info!("Browser session closed");
    }
}
