//! Shared test utilities for the model-price-sync workspace.
//!
//! This crate provides standardised fixtures so the core and CLI test suites
//! set up sync workspaces the same way. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`] builder for config, upstream and output files

pub mod workspace;

pub use workspace::{TestWorkspace, sample_upstream};
