//! Durable state: the output dataset and its hash
//!
//! Both files are read at the start of a run and written together at the
//! end, only when the output changed. [`MemoryStore`] stands in for the
//! filesystem in tests.

use std::path::{Path, PathBuf};

use price_fs::checksum::is_digest;
use price_fs::io;

use crate::Result;
use crate::config::SyncConfig;
use crate::dataset::{Dataset, parse_dataset};

/// Load/save access to the persisted output and its digest.
pub trait DatasetStore {
    /// Where the output lives, for messages.
    fn describe(&self) -> String;

    /// Rendered output exactly as persisted, or `None` before the first run.
    fn load_rendered(&self) -> Result<Option<String>>;

    /// The recorded digest.
    ///
    /// Missing, empty or unreadable hash files all mean "no prior digest";
    /// the next run then writes unconditionally.
    fn load_digest(&self) -> Option<String>;

    /// Persist the rendered output followed by its digest.
    fn save(&mut self, rendered: &str, digest: &str) -> Result<()>;

    /// Prior output as a dataset, or `None` before the first run.
    ///
    /// # Errors
    ///
    /// A prior output that exists but is not a JSON object is a parse error.
    fn load_dataset(&self) -> Result<Option<Dataset>> {
        match self.load_rendered()? {
            Some(rendered) => {
                let origin = format!("prior output {}", self.describe());
                parse_dataset(rendered.as_bytes(), &origin).map(Some)
            }
            None => Ok(None),
        }
    }
}

fn digest_from_text(text: &str, origin: &str) -> Option<String> {
    let digest = text.trim();
    if digest.is_empty() {
        return None;
    }
    if !is_digest(digest) {
        tracing::warn!("Ignoring malformed digest in {}", origin);
        return None;
    }
    Some(digest.to_string())
}

/// Output and hash files on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    output_path: PathBuf,
    hash_path: PathBuf,
}

impl FileStore {
    pub fn new(output_path: impl Into<PathBuf>, hash_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            hash_path: hash_path.into(),
        }
    }

    /// Resolve the configured output and hash paths against `root`.
    pub fn from_config(config: &SyncConfig, root: &Path) -> Self {
        Self::new(root.join(&config.output_file), root.join(&config.hash_file))
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn hash_path(&self) -> &Path {
        &self.hash_path
    }
}

impl DatasetStore for FileStore {
    fn describe(&self) -> String {
        self.output_path.display().to_string()
    }

    fn load_rendered(&self) -> Result<Option<String>> {
        let rendered = io::read_text_optional(&self.output_path)?;
        if rendered.is_none() {
            tracing::info!("No existing output file; starting fresh.");
        }
        Ok(rendered)
    }

    fn load_digest(&self) -> Option<String> {
        match io::read_text_optional(&self.hash_path) {
            Ok(Some(text)) => digest_from_text(&text, &self.hash_path.display().to_string()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Could not read hash file, forcing a write: {}", e);
                None
            }
        }
    }

    fn save(&mut self, rendered: &str, digest: &str) -> Result<()> {
        io::write_text(&self.output_path, rendered)?;
        io::write_text(&self.hash_path, &format!("{}\n", digest))?;

        tracing::info!("Output written: {}", self.output_path.display());
        tracing::info!("Hash written:   {}", self.hash_path.display());
        Ok(())
    }
}

/// In-memory store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rendered: Option<String>,
    digest: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with prior output text and a recorded digest.
    pub fn with_state(rendered: impl Into<String>, digest: Option<&str>) -> Self {
        Self {
            rendered: Some(rendered.into()),
            digest: digest.map(str::to_string),
            writes: 0,
        }
    }

    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Number of times [`DatasetStore::save`] ran
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DatasetStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn load_rendered(&self) -> Result<Option<String>> {
        Ok(self.rendered.clone())
    }

    fn load_digest(&self) -> Option<String> {
        self.digest
            .as_deref()
            .and_then(|text| digest_from_text(text, "memory"))
    }

    fn save(&mut self, rendered: &str, digest: &str) -> Result<()> {
        self.rendered = Some(rendered.to_string());
        self.digest = Some(digest.to_string());
        self.writes += 1;
        Ok(())
    }
}
