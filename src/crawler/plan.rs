//! Work planning for the crawl
//!
//! The plan is built once, before any extraction: topics are enumerated and
//! each topic's block count recorded, so the execution pass walks a static
//! cross-product instead of re-deriving counts while the site mutates under
//! it.

use std::fmt;

/// A single (topic, block) pair to process. Derived from plan enumeration,
/// never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkUnit {
    pub topic_index: usize,
    pub block_index: usize,
}

impl WorkUnit {
    pub fn new(topic_index: usize, block_index: usize) -> Self {
        Self {
            topic_index,
            block_index,
        }
    }

    /// Progress-file key, e.g. `"2_0"`
    pub fn key(&self) -> String {
        format!("{}_{}", self.topic_index, self.block_index)
    }
}

impl fmt::Display for WorkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.topic_index, self.block_index)
    }
}

/// One topic's slice of the plan
#[derive(Debug, Clone)]
pub struct TopicPlan {
    /// Position of the topic in the entry menu
    pub index: usize,

    /// Display name read from the menu
    pub name: String,

    /// The site's own topic identifier
    pub external_id: String,

    /// Number of blocks observed under this topic during planning
    pub block_count: usize,
}

/// The full static plan for a run
#[derive(Debug, Clone, Default)]
pub struct CrawlPlan {
    pub topics: Vec<TopicPlan>,
}

impl CrawlPlan {
    /// Looks up a topic by its menu index.
    ///
    /// Topics that failed to enumerate during planning are absent, so the
    /// vec may be sparse in terms of indices.
    pub fn topic(&self, index: usize) -> Option<&TopicPlan> {
        self.topics.iter().find(|t| t.index == index)
    }

    /// All work units in plan order: topics as enumerated, blocks in order
    /// within each topic
    pub fn units(&self) -> Vec<WorkUnit> {
        let mut units = Vec::with_capacity(self.total_units());
        for topic in &self.topics {
            for block_index in 0..topic.block_count {
                units.push(WorkUnit::new(topic.index, block_index));
            }
        }
        units
    }

    pub fn total_units(&self) -> usize {
        self.topics.iter().map(|t| t.block_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> CrawlPlan {
        CrawlPlan {
            topics: vec![
                TopicPlan {
                    index: 0,
                    name: "First law".to_string(),
                    external_id: "11".to_string(),
                    block_count: 2,
                },
                // Index 1 missing: that topic failed to enumerate
                TopicPlan {
                    index: 2,
                    name: "Third law".to_string(),
                    external_id: "13".to_string(),
                    block_count: 1,
                },
            ],
        }
    }

    #[test]
    fn test_key_and_display_agree() {
        let unit = WorkUnit::new(3, 7);
        assert_eq!(unit.key(), "3_7");
        assert_eq!(format!("{}", unit), "3_7");
    }

    #[test]
    fn test_units_in_plan_order() {
        let units = plan().units();
        assert_eq!(
            units,
            vec![
                WorkUnit::new(0, 0),
                WorkUnit::new(0, 1),
                WorkUnit::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_total_units() {
        assert_eq!(plan().total_units(), 3);
    }

    #[test]
    fn test_topic_lookup_by_menu_index() {
        let plan = plan();
        assert_eq!(plan.topic(2).unwrap().name, "Third law");
        assert!(plan.topic(1).is_none());
    }
}
