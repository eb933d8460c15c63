//! Merging filtered upstream entries into the prior output

use serde::{Deserialize, Serialize};

use crate::config::SyncMode;
use crate::dataset::Dataset;

/// Counts produced by [`merge_models`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Keys that were not in the prior output (every key in full mode)
    pub added: usize,
    /// Prior keys whose value was replaced by a different upstream value
    pub updated: usize,
    /// Filtered keys that left the prior value as it was
    pub unchanged: usize,
    /// Size of the filtered upstream set
    pub total_upstream: usize,
}

/// Merge `filtered` into `prior` according to `mode`.
///
/// In [`SyncMode::Full`] the prior output is discarded. In
/// [`SyncMode::Additive`] prior keys are never removed; an existing key is
/// overwritten only when `update_existing` is set.
pub fn merge_models(
    prior: Dataset,
    filtered: Dataset,
    mode: SyncMode,
    update_existing: bool,
) -> (Dataset, MergeStats) {
    let mut stats = MergeStats {
        total_upstream: filtered.len(),
        ..MergeStats::default()
    };

    if mode == SyncMode::Full {
        stats.added = filtered.len();
        return (filtered, stats);
    }

    let mut merged = prior;
    for (key, value) in filtered {
        match merged.get_mut(&key) {
            None => {
                tracing::debug!(model = %key, "Adding new model");
                merged.insert(key, value);
                stats.added += 1;
            }
            Some(existing) if update_existing && *existing != value => {
                tracing::debug!(model = %key, "Updating model pricing");
                *existing = value;
                stats.updated += 1;
            }
            Some(_) => stats.unchanged += 1,
        }
    }

    (merged, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dataset(entries: &[(&str, serde_json::Value)]) -> Dataset {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn additive_without_update_keeps_prior_value() {
        let prior = dataset(&[("claude-3", json!({"price": 1}))]);
        let filtered = dataset(&[("claude-3", json!({"price": 2}))]);

        let (merged, stats) = merge_models(prior, filtered, SyncMode::Additive, false);

        assert_eq!(merged["claude-3"], json!({"price": 1}));
        assert_eq!(
            stats,
            MergeStats {
                added: 0,
                updated: 0,
                unchanged: 1,
                total_upstream: 1
            }
        );
    }

    #[test]
    fn additive_with_update_overwrites_changed_values() {
        let prior = dataset(&[
            ("claude-3", json!({"price": 1})),
            ("claude-2", json!({"price": 5})),
        ]);
        let filtered = dataset(&[
            ("claude-3", json!({"price": 2})),
            ("claude-2", json!({"price": 5})),
            ("claude-4", json!({"price": 9})),
        ]);

        let (merged, stats) = merge_models(prior, filtered, SyncMode::Additive, true);

        assert_eq!(merged["claude-3"], json!({"price": 2}));
        assert_eq!(merged["claude-4"], json!({"price": 9}));
        assert_eq!(stats.added, 1);
        assert_eq!(stats.updated, 1);
        assert_eq!(stats.unchanged, 1);
    }

    #[test]
    fn additive_never_removes_prior_keys() {
        let prior = dataset(&[("retired-model", json!({"price": 3}))]);
        let (merged, _) = merge_models(prior, Dataset::new(), SyncMode::Additive, true);
        assert!(merged.contains_key("retired-model"));
    }

    #[test]
    fn full_mode_discards_prior_output() {
        let prior = dataset(&[("retired-model", json!({"price": 3}))]);
        let filtered = dataset(&[("gpt-4", json!({"price": 4}))]);

        let (merged, stats) = merge_models(prior, filtered.clone(), SyncMode::Full, false);

        assert_eq!(merged, filtered);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.total_upstream, 1);
    }
}
