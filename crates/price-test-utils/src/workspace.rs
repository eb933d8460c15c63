//! [`TestWorkspace`] builder for synchronizer test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Config file name written by [`TestWorkspace::write_config`]
pub const CONFIG_FILE: &str = "config.json";
/// Upstream file name written by [`TestWorkspace::write_upstream`]
pub const UPSTREAM_FILE: &str = "upstream.json";
/// Output path used by [`TestWorkspace::default_config`]
pub const OUTPUT_FILE: &str = "data/prices.json";
/// Hash path used by [`TestWorkspace::default_config`]
pub const HASH_FILE: &str = "data/prices.sha256";

/// A small upstream dataset in the shape of the real pricing file.
pub fn sample_upstream() -> Value {
    json!({
        "sample_spec": {
            "input_cost_per_token": 0.0,
            "output_cost_per_token": 0.0
        },
        "gpt-4": {
            "input_cost_per_token": 3e-5,
            "output_cost_per_token": 6e-5,
            "litellm_provider": "openai",
            "mode": "chat"
        },
        "gpt-4-preview": {
            "input_cost_per_token": 1e-5,
            "output_cost_per_token": 3e-5,
            "litellm_provider": "openai",
            "mode": "chat"
        },
        "claude-3": {
            "input_cost_per_token": 3e-6,
            "output_cost_per_token": 1.5e-5,
            "cache_creation_input_token_cost": 3.75e-6,
            "litellm_provider": "anthropic",
            "mode": "chat"
        },
        "other-model": {
            "input_cost_per_token": 1e-6,
            "output_cost_per_token": 2e-6,
            "mode": "chat"
        }
    })
}

/// A temporary root directory laid out the way the synchronizer expects.
///
/// # Example
///
/// ```rust,no_run
/// use price_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_config(&TestWorkspace::default_config());
/// ws.write_upstream(&price_test_utils::sample_upstream());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the workspace.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Config reading `upstream.json` and writing under `data/`,
    /// additive mode, keeping `gpt-` and `claude-` keys.
    pub fn default_config() -> Value {
        json!({
            "upstream_url": UPSTREAM_FILE,
            "output_file": OUTPUT_FILE,
            "hash_file": HASH_FILE,
            "sync_mode": "additive",
            "prefix_filters": ["gpt-", "claude-"]
        })
    }

    /// Write `config` as `config.json` and return its path.
    pub fn write_config(&self, config: &Value) -> PathBuf {
        self.write_json(CONFIG_FILE, config)
    }

    /// Write `dataset` as `upstream.json` and return its path.
    pub fn write_upstream(&self, dataset: &Value) -> PathBuf {
        self.write_json(UPSTREAM_FILE, dataset)
    }

    /// Pretty-print `value` to `relative`, creating parent directories.
    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        self.write_file(relative, &serde_json::to_string_pretty(value).unwrap())
    }

    /// Write raw `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read `relative` as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_text(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Read `relative` as JSON.
    ///
    /// # Panics
    /// Panics if the file cannot be read or parsed.
    pub fn read_json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read_text(relative))
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", relative, e))
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that `relative` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(
            !path.exists(),
            "Expected file NOT to exist: {}",
            path.display()
        );
    }
}
