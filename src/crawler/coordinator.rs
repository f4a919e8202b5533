//! Crawl coordinator - main orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! a run:
//! - Building the static (topic → block count) plan
//! - Driving navigation and extraction per work unit
//! - Persisting incremental results with write-then-mark ordering
//! - Skipping units the progress store already records
//! - Containing per-unit failures so one bad unit never aborts the run

use crate::browser::SiteSession;
use crate::config::Config;
use crate::crawler::plan::{CrawlPlan, TopicPlan, WorkUnit};
use crate::output::CrawlReport;
use crate::question::QuestionBank;
use crate::state::UnitState;
use crate::storage::{load_snapshot, write_snapshot, JsonProgressStore, ProgressStore};
use crate::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main crawl coordinator
///
/// Generic over the site seam so tests can drive it with a scripted fake
/// session instead of a live browser.
pub struct Coordinator<S: SiteSession> {
    site: S,
    progress: JsonProgressStore,
    bank: QuestionBank,
    report: CrawlReport,
    snapshot_path: PathBuf,
    cooldown: Duration,
}

impl<S: SiteSession> Coordinator<S> {
    /// Creates a coordinator, loading progress and any prior snapshot.
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    /// * `site` - The site session to drive
    /// * `fresh` - Discard saved progress and start over
    pub fn new(config: &Config, site: S, fresh: bool) -> Self {
        let progress_path = Path::new(&config.output.progress_path);
        let snapshot_path = PathBuf::from(&config.output.snapshot_path);

        let (progress, bank) = if fresh {
            // A stale snapshot would be re-loaded by the next resume; drop it
            // together with the progress record
            let _ = std::fs::remove_file(&snapshot_path);
            (JsonProgressStore::fresh(progress_path), QuestionBank::new())
        } else {
            let progress = JsonProgressStore::load(progress_path);
            // Resume keeps earlier units' records in the aggregate so the
            // snapshot stays a superset of everything marked completed
            let bank = match load_snapshot(&snapshot_path) {
                Ok(bank) => {
                    tracing::info!("Loaded {} questions from previous snapshot", bank.len());
                    bank
                }
                Err(_) => QuestionBank::new(),
            };
            (progress, bank)
        };

        Self {
            site,
            progress,
            bank,
            report: CrawlReport::new(),
            snapshot_path,
            cooldown: Duration::from_millis(config.crawler.unit_cooldown_ms),
        }
    }

    /// The aggregate accumulated so far
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// The report for this run (valid mid-run after an interrupt)
    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    /// Consumes the coordinator, returning the site session for shutdown
    pub fn into_site(self) -> S {
        self.site
    }

    /// Runs the full crawl: plan pass, then every unit in plan order
    pub async fn run(&mut self) -> Result<CrawlReport> {
        let plan = self.build_plan().await?;
        self.report.topics_planned = plan.topics.len();
        self.report.units_planned = plan.total_units();
        tracing::info!(
            "Plan ready: {} topics, {} work units",
            plan.topics.len(),
            plan.total_units()
        );

        for unit in plan.units() {
            if self.progress.is_completed(unit) {
                tracing::info!("Unit {} already completed, skipping", unit);
                self.report.units_skipped += 1;
                continue;
            }

            let state = self.process_unit(&plan, unit).await?;
            if state.is_success() {
                self.report.units_completed += 1;
            } else {
                self.report.units_failed += 1;
                self.report.failed_units.push(unit.key());
            }

            self.report.questions_extracted = self.bank.len();

            // Fixed cooldown so the remote UI is never hammered
            tokio::time::sleep(self.cooldown).await;
        }

        self.report.questions_extracted = self.bank.len();
        self.report.finish();
        tracing::info!(
            "Crawl finished: {} completed, {} skipped, {} failed, {} questions",
            self.report.units_completed,
            self.report.units_skipped,
            self.report.units_failed,
            self.bank.len()
        );

        Ok(self.report.clone())
    }

    /// Enumerates topics and their block counts before any extraction.
    ///
    /// The first navigation must succeed: without the entry menu there is
    /// no plan. Individual topics that fail to enumerate are left out of
    /// the plan (and logged) rather than aborting.
    async fn build_plan(&mut self) -> Result<CrawlPlan> {
        self.site.goto_root().await?;
        let topics = self.site.list_topics().await?;
        tracing::info!("Found {} topics", topics.len());

        let mut plan = CrawlPlan::default();
        for (index, choice) in topics.iter().enumerate() {
            match self.site.goto_root().await {
                Ok(()) => {}
                Err(e) if e.is_unit_recoverable() => {
                    tracing::warn!("Topic {} left out of plan: {}", index + 1, e);
                    continue;
                }
                Err(fatal) => return Err(fatal),
            }

            if !self.site.select_topic(index).await {
                tracing::warn!(
                    "Topic {} left out of plan: did not activate",
                    index + 1
                );
                continue;
            }

            let blocks = self.site.list_blocks().await?;
            tracing::info!(
                "Topic {} ({}): {} blocks",
                index + 1,
                choice.name,
                blocks.len()
            );

            plan.topics.push(TopicPlan {
                index,
                name: choice.name.clone(),
                external_id: choice.external_id.clone(),
                block_count: blocks.len(),
            });
        }

        Ok(plan)
    }

    /// Drives one work unit through its state machine.
    ///
    /// Returns `Persisted` on success or `Failed` on a contained failure;
    /// only session-fatal errors propagate as `Err`.
    async fn process_unit(&mut self, plan: &CrawlPlan, unit: WorkUnit) -> Result<UnitState> {
        let topic_name = plan
            .topic(unit.topic_index)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        tracing::info!(
            "Processing topic {} ({}), block {}",
            unit.topic_index + 1,
            topic_name,
            unit.block_index + 1
        );

        match self.site.goto_root().await {
            Ok(()) => {}
            Err(e) if e.is_unit_recoverable() => {
                return Ok(unit_failed(unit, UnitState::Navigating, &e.to_string()));
            }
            Err(fatal) => return Err(fatal),
        }

        if !self.site.select_topic(unit.topic_index).await {
            return Ok(unit_failed(
                unit,
                UnitState::TopicSelected,
                "topic did not activate",
            ));
        }

        if !self.site.select_block(unit.block_index).await {
            return Ok(unit_failed(
                unit,
                UnitState::BlockSelected,
                "block did not activate or no longer exists",
            ));
        }

        if !self.site.start_quiz().await {
            return Ok(unit_failed(
                unit,
                UnitState::QuizStarted,
                "quiz-start control did not activate",
            ));
        }

        let questions = match self.site.extract().await {
            Ok(questions) => questions,
            Err(e) if e.is_unit_recoverable() => {
                return Ok(unit_failed(unit, UnitState::Extracted, &e.to_string()));
            }
            Err(fatal) => return Err(fatal),
        };

        if questions.is_empty() {
            return Ok(unit_failed(
                unit,
                UnitState::Extracted,
                "no question data found on quiz page",
            ));
        }

        let count = questions.len();
        self.bank.append(questions);
        tracing::info!(
            "Unit {}: extracted {} questions ({} total)",
            unit,
            count,
            self.bank.len()
        );

        // Snapshot before marking so a completion mark never points at
        // records that were lost
        if let Err(e) = write_snapshot(&self.snapshot_path, &self.bank) {
            return Ok(unit_failed(
                unit,
                UnitState::Persisted,
                &format!("snapshot write failed, leaving unit unmarked: {}", e),
            ));
        }

        if let Err(e) = self.progress.mark_completed(unit, self.bank.len()) {
            return Ok(unit_failed(
                unit,
                UnitState::Persisted,
                &format!("progress write failed, unit will be retried next run: {}", e),
            ));
        }

        Ok(UnitState::Persisted)
    }
}

/// Logs a contained unit failure with the stage it was reached in
fn unit_failed(unit: WorkUnit, stage: UnitState, reason: &str) -> UnitState {
    tracing::warn!("Unit {} failed reaching {}: {}", unit, stage, reason);
    UnitState::Failed
}
