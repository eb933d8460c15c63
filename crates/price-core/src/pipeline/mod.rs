//! The dataset pipeline
//!
//! Pure transformations applied in a fixed order each run:
//! filter → merge → aliases → cache auto-fill → custom models.
//! Nothing in here touches the disk or the network.

pub mod alias;
pub mod autofill;
pub mod custom;
pub mod filter;
pub mod merge;

pub use alias::{AliasOutcome, SkippedAlias, resolve_aliases};
pub use autofill::fill_cache_1hr_pricing;
pub use custom::inject_custom_models;
pub use filter::{filter_upstream, is_included};
pub use merge::{MergeStats, merge_models};

use crate::config::SyncConfig;
use crate::dataset::Dataset;

/// The next output dataset and what each stage did to produce it
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub dataset: Dataset,
    pub merge: MergeStats,
    pub aliases: AliasOutcome,
    /// Keys that received a derived 1-hour cache price
    pub auto_filled: Vec<String>,
    /// Number of custom models injected
    pub custom_models: usize,
}

/// Run every pipeline stage over `prior` and `upstream`.
pub fn build_dataset(config: &SyncConfig, prior: Dataset, upstream: &Dataset) -> PipelineOutput {
    let filtered = filter_upstream(upstream, &config.prefix_filters, &config.exclude_patterns);

    let (mut dataset, merge) =
        merge_models(prior, filtered, config.sync_mode, config.update_existing);
    tracing::info!(
        "Merge stats: {} added, {} updated, {} unchanged.",
        merge.added,
        merge.updated,
        merge.unchanged
    );

    let aliases = resolve_aliases(&mut dataset, &config.aliases);

    let auto_filled = match &config.cache_auto_fill {
        Some(rule) => fill_cache_1hr_pricing(&mut dataset, rule),
        None => Vec::new(),
    };

    let custom_models = inject_custom_models(&mut dataset, &config.custom_models);

    PipelineOutput {
        dataset,
        merge,
        aliases,
        auto_filled,
        custom_models,
    }
}
