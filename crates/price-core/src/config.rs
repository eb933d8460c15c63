//! Synchronizer configuration
//!
//! The configuration is read once per run from `config.json` (or a TOML/YAML
//! equivalent) and validated before any network activity happens.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Default HTTP timeout for the upstream fetch, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_auto_fill_prefix() -> String {
    "claude-".to_string()
}

fn default_auto_fill_ratio() -> f64 {
    1.6
}

/// How filtered upstream entries are combined with the prior output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Keep every prior key; add new keys and optionally update existing ones.
    #[default]
    Additive,
    /// Recompute the output from this run's upstream data only.
    Full,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Additive => write!(f, "additive"),
            SyncMode::Full => write!(f, "full"),
        }
    }
}

/// An alias entry: the alias key receives a copy of `source`'s pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasSpec {
    /// Model key whose pricing object is copied
    pub source: String,

    /// Free-form metadata kept alongside the alias (descriptions, notes).
    /// It never reaches the output.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl AliasSpec {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Derives the 1-hour cache write price from the 5-minute one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheAutoFill {
    /// Only keys starting with this prefix are filled
    #[serde(default = "default_auto_fill_prefix")]
    pub model_prefix: String,

    /// Multiplier applied to the 5-minute cache write price
    #[serde(default = "default_auto_fill_ratio")]
    pub ratio: f64,
}

impl Default for CacheAutoFill {
    fn default() -> Self {
        Self {
            model_prefix: default_auto_fill_prefix(),
            ratio: default_auto_fill_ratio(),
        }
    }
}

/// Configuration for one synchronization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Upstream locator: an `http(s)://` URL, a `file://` URL, or a path
    pub upstream_url: String,

    /// Output dataset path, relative to the root directory
    pub output_file: String,

    /// Hash file path, relative to the root directory
    pub hash_file: String,

    pub sync_mode: SyncMode,

    /// Keys must start with one of these to be included
    pub prefix_filters: Vec<String>,

    /// Overwrite prior entries with upstream values in additive mode
    #[serde(default)]
    pub update_existing: bool,

    /// Keys containing any of these substrings are always excluded
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Applied in the order written, so an alias may copy an earlier one
    #[serde(default)]
    pub aliases: IndexMap<String, AliasSpec>,

    /// Entries injected verbatim into every output
    #[serde(default)]
    pub custom_models: BTreeMap<String, Value>,

    #[serde(default, rename = "cache_1hr_auto_fill")]
    pub cache_auto_fill: Option<CacheAutoFill>,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl SyncConfig {
    /// Create a configuration with empty filter, alias and custom sections.
    pub fn new(
        upstream_url: impl Into<String>,
        output_file: impl Into<String>,
        hash_file: impl Into<String>,
        sync_mode: SyncMode,
    ) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            output_file: output_file.into(),
            hash_file: hash_file.into(),
            sync_mode,
            prefix_filters: Vec::new(),
            update_existing: false,
            exclude_patterns: Vec::new(),
            aliases: IndexMap::new(),
            custom_models: BTreeMap::new(),
            cache_auto_fill: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }

    pub fn with_prefix_filters<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_filters = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_update_existing(mut self, update_existing: bool) -> Self {
        self.update_existing = update_existing;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>, source: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), AliasSpec::new(source));
        self
    }

    pub fn with_custom_model(mut self, key: impl Into<String>, pricing: Value) -> Self {
        self.custom_models.insert(key.into(), pricing);
        self
    }

    pub fn with_cache_auto_fill(mut self, auto_fill: CacheAutoFill) -> Self {
        self.cache_auto_fill = Some(auto_fill);
        self
    }

    /// Load and validate configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is missing, cannot be parsed, or
    /// fails validation. Other read failures surface as [`Error::Fs`].
    pub fn load(path: &Path) -> Result<Self> {
        let config: SyncConfig = price_fs::ConfigStore::new()
            .load(path)
            .map_err(|e| match e {
                e if e.is_not_found() => {
                    Error::config(format!("Config file not found: {}", path.display()))
                }
                e @ (price_fs::Error::ConfigParse { .. }
                | price_fs::Error::UnsupportedFormat { .. }) => Error::config(e.to_string()),
                e => Error::Fs(e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.upstream_url.trim().is_empty() {
            return Err(Error::config("upstream_url must not be empty"));
        }
        if self.output_file.trim().is_empty() {
            return Err(Error::config("output_file must not be empty"));
        }
        if self.hash_file.trim().is_empty() {
            return Err(Error::config("hash_file must not be empty"));
        }
        if self.output_file == self.hash_file {
            return Err(Error::config(format!(
                "output_file and hash_file must differ (both '{}')",
                self.output_file
            )));
        }

        if self.exclude_patterns.iter().any(String::is_empty) {
            tracing::warn!(
                "exclude_patterns contains an empty string; every key will be excluded."
            );
        }

        if let Some((alias, _)) = self.aliases.iter().find(|(_, spec)| spec.source.is_empty()) {
            return Err(Error::config(format!("Alias '{}' has an empty source", alias)));
        }

        for (key, pricing) in &self.custom_models {
            if !pricing.is_object() {
                return Err(Error::config(format!(
                    "Custom model '{}' must be an object",
                    key
                )));
            }
        }

        if let Some(auto_fill) = &self.cache_auto_fill
            && !(auto_fill.ratio.is_finite() && auto_fill.ratio > 0.0)
        {
            return Err(Error::config(format!(
                "cache_1hr_auto_fill.ratio must be a positive number, got {}",
                auto_fill.ratio
            )));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(Error::config("fetch_timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}
