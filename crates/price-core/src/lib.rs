//! Core logic for Model Price Sync
//!
//! Keeps a curated subset of a large upstream pricing dataset up to date:
//!
//! - **Configuration**: [`SyncConfig`] loaded and validated once per run
//! - **Pipeline**: filter, merge, aliases, cache auto-fill and custom models
//! - **Change detection**: deterministic rendering plus a SHA-256 digest
//! - **Synchronizer**: persists the output only when the digest changed
//!
//! # Architecture
//!
//! ```text
//!        price-cli
//!            |
//!       price-core ── UpstreamSource (HTTP / file / memory)
//!            |
//!        price-fs ─── DatasetStore (files / memory)
//! ```
//!
//! # Example
//!
//! ```
//! use price_core::{MemoryStore, StaticSource, SyncConfig, SyncMode, SyncOptions, Synchronizer};
//! use serde_json::json;
//!
//! let config = SyncConfig::new("memory", "prices.json", "prices.sha256", SyncMode::Additive)
//!     .with_prefix_filters(["gpt-"]);
//! let mut upstream = price_core::Dataset::new();
//! upstream.insert("gpt-4".into(), json!({"input_cost_per_token": 3e-5}));
//!
//! let mut sync = Synchronizer::new(config, StaticSource::new(upstream), MemoryStore::new());
//! let report = sync.run(&SyncOptions::default()).unwrap();
//! assert!(report.changed());
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod sync;

pub use config::{AliasSpec, CacheAutoFill, SyncConfig, SyncMode};
pub use dataset::{Dataset, parse_dataset, render_dataset};
pub use error::{Error, Result};
pub use pipeline::{MergeStats, PipelineOutput, SkippedAlias, build_dataset};
pub use source::{FileSource, HttpSource, StaticSource, UpstreamSource, source_for};
pub use store::{DatasetStore, FileStore, MemoryStore};
pub use sync::{
    CheckReport, CheckStatus, SyncOptions, SyncReport, Synchronizer, WriteOutcome, check,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_config_displays_message() {
        let error = Error::config("prefix_filters must not contain empty strings");
        let display = format!("{}", error);
        assert!(
            display.contains("prefix_filters"),
            "Error display should contain the message, got: {}",
            display
        );
    }

    #[test]
    fn error_from_fs_is_transparent() {
        let fs_error = price_fs::Error::io(
            "/tmp/prices.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let error: Error = fs_error.into();
        assert!(error.to_string().contains("/tmp/prices.json"));
    }
}
