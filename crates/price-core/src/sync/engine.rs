//! Synchronizer implementation
//!
//! The Synchronizer runs one batch: read prior state, fetch upstream, build
//! the next dataset, and persist it only if its digest changed.

use price_fs::compute_digest;

use crate::Result;
use crate::config::SyncConfig;
use crate::dataset::render_dataset;
use crate::pipeline::build_dataset;
use crate::source::UpstreamSource;
use crate::store::DatasetStore;

use super::report::{SyncReport, WriteOutcome};

/// Options for a synchronization run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, compute everything but leave the store untouched.
    pub dry_run: bool,
}

/// Write `rendered` and `digest` unless `digest` matches `prior_digest`.
pub fn persist(
    store: &mut dyn DatasetStore,
    rendered: &str,
    digest: &str,
    prior_digest: Option<&str>,
    dry_run: bool,
) -> Result<WriteOutcome> {
    if prior_digest == Some(digest) {
        tracing::info!("No changes detected (hash matches).");
        return Ok(WriteOutcome::Unchanged);
    }

    if dry_run {
        tracing::info!("[dry-run] Would write {}", store.describe());
        return Ok(WriteOutcome::WouldUpdate);
    }

    store.save(rendered, digest)?;
    Ok(WriteOutcome::Updated)
}

/// Engine for one synchronization run
///
/// Generic over where upstream data comes from and where output is kept, so
/// the same run logic works against files, HTTP, or in-memory stand-ins.
pub struct Synchronizer<S, T> {
    config: SyncConfig,
    source: S,
    store: T,
}

impl<S: UpstreamSource, T: DatasetStore> Synchronizer<S, T> {
    pub fn new(config: SyncConfig, source: S, store: T) -> Self {
        Self {
            config,
            source,
            store,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    /// Consume the synchronizer, returning its store.
    pub fn into_store(self) -> T {
        self.store
    }

    /// Run the full pipeline once.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable prior output, a failed upstream fetch, or a
    /// failed write. Failures before the write leave the store untouched.
    pub fn run(&mut self, options: &SyncOptions) -> Result<SyncReport> {
        let span = tracing::info_span!("sync", mode = %self.config.sync_mode);
        let _enter = span.enter();

        let prior = self.store.load_dataset()?.unwrap_or_default();
        let previous_digest = self.store.load_digest();
        let prior_models = prior.len();
        tracing::info!("Existing output has {} models.", prior_models);

        let upstream = self.source.fetch()?;

        let output = build_dataset(&self.config, prior, &upstream);

        let rendered = render_dataset(&output.dataset)?;
        let digest = compute_digest(rendered.as_bytes());

        let outcome = persist(
            &mut self.store,
            &rendered,
            &digest,
            previous_digest.as_deref(),
            options.dry_run,
        )?;

        Ok(SyncReport {
            outcome,
            digest,
            previous_digest,
            prior_models,
            total_models: output.dataset.len(),
            merge: output.merge,
            aliases_applied: output.aliases.applied,
            aliases_skipped: output.aliases.skipped,
            auto_filled: output.auto_filled,
            custom_models: output.custom_models,
        })
    }
}
