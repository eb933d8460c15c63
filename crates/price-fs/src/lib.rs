//! Filesystem layer for Model Price Sync
//!
//! Provides the small set of disk operations the synchronizer relies on:
//! locked atomic writes, reads that treat a missing file as "no prior state",
//! SHA-256 digests for change detection, and format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;

pub use checksum::compute_digest;
pub use config::ConfigStore;
pub use error::{Error, Result};
