//! Offline drift check between the output file and its recorded hash

use serde::{Deserialize, Serialize};

use price_fs::compute_digest;

use crate::Result;
use crate::store::DatasetStore;

/// Status of the drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Recorded hash matches the output
    Healthy,
    /// Output or hash is absent
    Missing,
    /// Output was modified after the hash was recorded
    Drifted,
}

/// Report from a drift check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    /// Digest stored in the hash file
    pub recorded: Option<String>,
    /// Digest of the output as it is now
    pub actual: Option<String>,
    pub messages: Vec<String>,
}

impl CheckReport {
    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }
}

/// Compare the stored output against its recorded digest. Never writes.
pub fn check(store: &dyn DatasetStore) -> Result<CheckReport> {
    let rendered = store.load_rendered()?;
    let recorded = store.load_digest();
    let actual = rendered.as_deref().map(|r| compute_digest(r.as_bytes()));

    let (status, messages) = match (&actual, &recorded) {
        (None, _) => (
            CheckStatus::Missing,
            vec![format!("Output not found: {}", store.describe())],
        ),
        (Some(_), None) => (
            CheckStatus::Missing,
            vec!["No valid hash recorded for the output".to_string()],
        ),
        (Some(actual), Some(recorded)) if actual == recorded => (CheckStatus::Healthy, Vec::new()),
        (Some(actual), Some(recorded)) => (
            CheckStatus::Drifted,
            vec![format!(
                "Checksum mismatch: expected {}, got {}",
                recorded, actual
            )],
        ),
    };

    Ok(CheckReport {
        status,
        recorded,
        actual,
        messages,
    })
}
