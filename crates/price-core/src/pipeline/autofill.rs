//! Derived 1-hour cache write pricing
//!
//! Upstream often publishes only the 5-minute cache write price for a model.
//! When configured, the 1-hour price is filled in as a fixed multiple of it.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Number, Value};

use crate::config::CacheAutoFill;
use crate::dataset::Dataset;

/// Field holding the 5-minute cache write price per token
pub const CACHE_WRITE_FIELD: &str = "cache_creation_input_token_cost";

/// Field holding the 1-hour cache write price per token
pub const CACHE_WRITE_1HR_FIELD: &str = "cache_creation_input_token_cost_above_1hr";

/// Multiply in decimal so the derived price carries no binary rounding noise.
fn scale(cost: f64, ratio: f64) -> f64 {
    let decimal = || -> Option<f64> {
        let cost = Decimal::from_str(&cost.to_string()).ok()?;
        let ratio = Decimal::from_str(&ratio.to_string()).ok()?;
        cost.checked_mul(ratio)?.to_f64()
    };
    decimal().unwrap_or(cost * ratio)
}

/// Fill the 1-hour cache write price for matching models that lack one.
///
/// Entries are skipped when they are not objects, have no numeric 5-minute
/// price, or already carry a non-null 1-hour price. Returns the filled keys.
pub fn fill_cache_1hr_pricing(dataset: &mut Dataset, rule: &CacheAutoFill) -> Vec<String> {
    let mut filled = Vec::new();

    for (key, value) in dataset.iter_mut() {
        if !key.starts_with(rule.model_prefix.as_str()) {
            continue;
        }
        let Value::Object(entry) = value else {
            continue;
        };
        let Some(cost) = entry.get(CACHE_WRITE_FIELD).and_then(Value::as_f64) else {
            continue;
        };
        if entry
            .get(CACHE_WRITE_1HR_FIELD)
            .is_some_and(|existing| !existing.is_null())
        {
            continue;
        }

        let derived = scale(cost, rule.ratio);
        let Some(number) = Number::from_f64(derived) else {
            tracing::warn!(model = %key, "Derived cache price {} is not a finite number", derived);
            continue;
        };

        tracing::info!(
            "Auto-filled cache 1hr cost for '{}': {} * {} = {}",
            key,
            cost,
            rule.ratio,
            derived
        );
        entry.insert(CACHE_WRITE_1HR_FIELD.to_string(), Value::Number(number));
        filled.push(key.clone());
    }

    filled
}
