//! Synchronization run and drift check
//!
//! - [`Synchronizer`]: one fetch → build → persist-if-changed run
//! - [`check`]: offline comparison of the output against its recorded hash

mod check;
mod engine;
mod report;

pub use check::{CheckReport, CheckStatus, check};
pub use engine::{SyncOptions, Synchronizer, persist};
pub use report::{SyncReport, WriteOutcome};

pub use crate::pipeline::SkippedAlias;
