//! Exclude/prefix filtering of the upstream dataset

use crate::dataset::Dataset;

/// Decide whether a single key survives filtering.
///
/// Exclusion wins over prefix matching. With no prefixes nothing is kept.
pub fn is_included(key: &str, prefixes: &[String], excludes: &[String]) -> bool {
    if excludes.iter().any(|pattern| key.contains(pattern.as_str())) {
        return false;
    }
    prefixes.iter().any(|prefix| key.starts_with(prefix.as_str()))
}

/// Keep the upstream entries whose keys pass [`is_included`].
pub fn filter_upstream(upstream: &Dataset, prefixes: &[String], excludes: &[String]) -> Dataset {
    if prefixes.is_empty() {
        tracing::warn!("prefix_filters is empty; no upstream entries will be included");
    }

    let filtered: Dataset = upstream
        .iter()
        .filter(|(key, _)| is_included(key, prefixes, excludes))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    tracing::info!(
        "Filtered to {} models (from {} upstream).",
        filtered.len(),
        upstream.len()
    );
    filtered
}
