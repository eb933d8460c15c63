//! Alias resolution: copy a source model's pricing under another key

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::AliasSpec;
use crate::dataset::Dataset;

/// An alias left out of the output because its source key was absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAlias {
    pub alias: String,
    pub source: String,
}

/// Result of [`resolve_aliases`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasOutcome {
    /// Alias keys written to the dataset
    pub applied: Vec<String>,
    pub skipped: Vec<SkippedAlias>,
}

/// Copy each alias source's pricing object under the alias key.
///
/// Aliases are processed in configuration order against the dataset as it is
/// being built, so an alias may name an alias written before it. The copy is
/// a structural clone: the alias and its source share nothing.
pub fn resolve_aliases(
    dataset: &mut Dataset,
    aliases: &IndexMap<String, AliasSpec>,
) -> AliasOutcome {
    let mut outcome = AliasOutcome::default();

    for (alias, spec) in aliases {
        let Some(pricing) = dataset.get(&spec.source).cloned() else {
            tracing::warn!(
                "Alias '{}': source model '{}' not found; skipping.",
                alias,
                spec.source
            );
            outcome.skipped.push(SkippedAlias {
                alias: alias.clone(),
                source: spec.source.clone(),
            });
            continue;
        };

        dataset.insert(alias.clone(), pricing);
        tracing::info!("Alias '{}' -> '{}' applied.", alias, spec.source);
        outcome.applied.push(alias.clone());
    }

    outcome
}
