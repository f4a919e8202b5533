/// Unit state definitions for tracking crawl progress
///
/// This module defines all possible states a work unit moves through while
/// being processed.
use std::fmt;

/// Represents the current state of a work unit in the crawl process
///
/// A unit advances `Pending → Navigating → TopicSelected → BlockSelected →
/// QuizStarted → Extracted → Persisted`, or drops to `Failed` at any
/// transition. Failure is terminal for the run but not for the unit: a later
/// run re-attempts every unit that never reached `Persisted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitState {
    /// Unit is planned but not yet started
    Pending,

    /// Navigation to the entry menu is in progress
    Navigating,

    /// The unit's topic has been activated
    TopicSelected,

    /// The unit's block has been activated
    BlockSelected,

    /// The quiz page has been opened
    QuizStarted,

    /// Question records were extracted from the quiz page
    Extracted,

    /// Records were snapshotted and the unit marked completed (terminal success)
    Persisted,

    /// A step failed; the unit is abandoned for this run (terminal)
    Failed,
}

impl UnitState {
    /// Returns true if this is a terminal state (no further processing this run)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Persisted | Self::Failed)
    }

    /// Returns true if this represents successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Persisted)
    }

    /// Converts the state to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Navigating => "navigating",
            Self::TopicSelected => "topic_selected",
            Self::BlockSelected => "block_selected",
            Self::QuizStarted => "quiz_started",
            Self::Extracted => "extracted",
            Self::Persisted => "persisted",
            Self::Failed => "failed",
        }
    }

    /// Parses a state from its string representation
    ///
    /// Returns None if the string doesn't match any known state.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "navigating" => Some(Self::Navigating),
            "topic_selected" => Some(Self::TopicSelected),
            "block_selected" => Some(Self::BlockSelected),
            "quiz_started" => Some(Self::QuizStarted),
            "extracted" => Some(Self::Extracted),
            "persisted" => Some(Self::Persisted),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns all possible unit states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Navigating,
            Self::TopicSelected,
            Self::BlockSelected,
            Self::QuizStarted,
            Self::Extracted,
            Self::Persisted,
            Self::Failed,
        ]
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(UnitState::Persisted.is_terminal());
        assert!(UnitState::Failed.is_terminal());

        assert!(!UnitState::Pending.is_terminal());
        assert!(!UnitState::Navigating.is_terminal());
        assert!(!UnitState::TopicSelected.is_terminal());
        assert!(!UnitState::BlockSelected.is_terminal());
        assert!(!UnitState::QuizStarted.is_terminal());
        assert!(!UnitState::Extracted.is_terminal());
    }

    #[test]
    fn test_is_success() {
        assert!(UnitState::Persisted.is_success());

        assert!(!UnitState::Failed.is_success());
        assert!(!UnitState::Extracted.is_success());
    }

    #[test]
    fn test_roundtrip_string() {
        for state in UnitState::all_states() {
            let s = state.as_str();
            let parsed = UnitState::parse(s);
            assert_eq!(Some(state), parsed, "Failed roundtrip for {:?}", state);
        }
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(UnitState::parse("invalid"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UnitState::Pending), "pending");
        assert_eq!(format!("{}", UnitState::QuizStarted), "quiz_started");
        assert_eq!(format!("{}", UnitState::Persisted), "persisted");
    }

    #[test]
    fn test_all_states_complete() {
        let all = UnitState::all_states();
        assert_eq!(all.len(), 8);

        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j], "Duplicate state found");
            }
        }
    }
}
