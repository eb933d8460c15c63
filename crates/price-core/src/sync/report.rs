//! Reporting types for a synchronization run

use serde::{Deserialize, Serialize};

use crate::pipeline::{MergeStats, SkippedAlias};

/// What [`crate::sync::persist`] did with the computed output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Digest matched the recorded one; nothing written
    Unchanged,
    /// Output and hash were written
    Updated,
    /// Output differs but the run was a dry run
    WouldUpdate,
}

impl WriteOutcome {
    /// True when the output differs from what was recorded.
    pub fn changed(&self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

/// Summary of a synchronization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub outcome: WriteOutcome,
    /// Digest of the computed output
    pub digest: String,
    /// Digest recorded before this run, if any
    pub previous_digest: Option<String>,
    /// Entries in the prior output
    pub prior_models: usize,
    /// Entries in the computed output
    pub total_models: usize,
    pub merge: MergeStats,
    pub aliases_applied: Vec<String>,
    pub aliases_skipped: Vec<SkippedAlias>,
    pub auto_filled: Vec<String>,
    pub custom_models: usize,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.outcome.changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unchanged_is_not_a_change() {
        assert!(!WriteOutcome::Unchanged.changed());
        assert!(WriteOutcome::Updated.changed());
        assert!(WriteOutcome::WouldUpdate.changed());
    }

    #[test]
    fn outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&WriteOutcome::WouldUpdate).unwrap(),
            "\"would_update\""
        );
    }
}
