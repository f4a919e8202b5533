//! Run reporting
//!
//! The report accumulates as the coordinator works and is printed at the
//! end of a run (or after an interrupt, covering whatever finished).

use chrono::{DateTime, Utc};

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Topics that made it into the plan
    pub topics_planned: usize,

    /// Total work units in the plan
    pub units_planned: usize,

    /// Units skipped because the progress store already records them
    pub units_skipped: usize,

    /// Units that reached Persisted this run
    pub units_completed: usize,

    /// Units that failed this run
    pub units_failed: usize,

    /// Questions in the aggregate at last count
    pub questions_extracted: usize,

    /// Keys of the failed units, in failure order
    pub failed_units: Vec<String>,
}

impl CrawlReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            topics_planned: 0,
            units_planned: 0,
            units_skipped: 0,
            units_completed: 0,
            units_failed: 0,
            questions_extracted: 0,
            failed_units: Vec::new(),
        }
    }

    /// Units actually driven this run (completed + failed)
    pub fn units_attempted(&self) -> usize {
        self.units_completed + self.units_failed
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

impl Default for CrawlReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Plan:");
    println!("  Topics: {}", report.topics_planned);
    println!("  Work units: {}", report.units_planned);
    println!();

    println!("Outcome:");
    println!("  Completed: {}", report.units_completed);
    println!("  Skipped (already done): {}", report.units_skipped);
    println!("  Failed: {}", report.units_failed);
    println!("  Questions extracted: {}", report.questions_extracted);
    if let Some(seconds) = report.duration_seconds() {
        println!(
            "  Duration: {} seconds ({:.1} minutes)",
            seconds,
            seconds as f64 / 60.0
        );
    }

    if !report.failed_units.is_empty() {
        println!("\nFailed units (will be retried next run):");
        for unit in &report.failed_units {
            println!("  - {}", unit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_zeroed() {
        let report = CrawlReport::new();
        assert_eq!(report.units_attempted(), 0);
        assert_eq!(report.questions_extracted, 0);
        assert!(report.finished_at.is_none());
    }

    #[test]
    fn test_units_attempted() {
        let mut report = CrawlReport::new();
        report.units_completed = 7;
        report.units_failed = 2;
        report.units_skipped = 4;

        // Skipped units were not attempted
        assert_eq!(report.units_attempted(), 9);
    }

    #[test]
    fn test_duration_only_after_finish() {
        let mut report = CrawlReport::new();
        assert_eq!(report.duration_seconds(), None);

        report.finish();
        assert!(report.duration_seconds().is_some());
    }
}
