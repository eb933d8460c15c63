//! Custom model injection

use std::collections::BTreeMap;

use serde_json::Value;

use crate::dataset::Dataset;

/// Write every custom model into the dataset, replacing whatever was there.
///
/// Runs last in the pipeline, so custom entries win over upstream data,
/// prior output and alias copies alike. Returns the number injected.
pub fn inject_custom_models(dataset: &mut Dataset, custom: &BTreeMap<String, Value>) -> usize {
    for (key, pricing) in custom {
        match dataset.insert(key.clone(), pricing.clone()) {
            Some(_) => tracing::info!("Custom model '{}' replaced existing entry.", key),
            None => tracing::info!("Custom model '{}' injected.", key),
        }
    }
    custom.len()
}
