//! Upstream dataset sources
//!
//! The synchronizer only needs "give me the current upstream dataset". HTTP
//! is the production transport; local files and in-memory datasets serve
//! offline runs and tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dataset::{Dataset, parse_dataset};
use crate::{Error, Result};

/// User-Agent sent with upstream HTTP requests
pub const USER_AGENT: &str = concat!("model-price-sync/", env!("CARGO_PKG_VERSION"));

const ORIGIN: &str = "upstream dataset";

/// Something that can produce the full upstream dataset.
pub trait UpstreamSource {
    /// Human-readable locator used in logs and errors.
    fn locator(&self) -> &str;

    /// Retrieve and parse the upstream dataset.
    ///
    /// # Errors
    ///
    /// [`Error::Fetch`] when the payload cannot be retrieved and
    /// [`Error::Parse`] when it is not a JSON object.
    fn fetch(&self) -> Result<Dataset>;
}

impl<S: UpstreamSource + ?Sized> UpstreamSource for Box<S> {
    fn locator(&self) -> &str {
        (**self).locator()
    }

    fn fetch(&self) -> Result<Dataset> {
        (**self).fetch()
    }
}

fn log_fetched(dataset: &Dataset) {
    tracing::info!("Upstream contains {} model entries.", dataset.len());
}

/// Blocking HTTP GET of a static JSON file
#[derive(Debug)]
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::fetch(&url, e))?;
        Ok(Self { url, client })
    }
}

impl UpstreamSource for HttpSource {
    fn locator(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Dataset> {
        tracing::info!("Fetching upstream: {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::fetch(&self.url, e))?;
        let body = response.bytes().map_err(|e| Error::fetch(&self.url, e))?;

        let dataset = parse_dataset(&body, ORIGIN)?;
        log_fetched(&dataset);
        Ok(dataset)
    }
}

/// Upstream dataset stored in a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    locator: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            locator: path.display().to_string(),
            path,
        }
    }
}

impl UpstreamSource for FileSource {
    fn locator(&self) -> &str {
        &self.locator
    }

    fn fetch(&self) -> Result<Dataset> {
        tracing::info!("Reading upstream: {}", self.locator);
        let bytes =
            price_fs::io::read_bytes(&self.path).map_err(|e| Error::fetch(&self.locator, e))?;

        let dataset = parse_dataset(&bytes, ORIGIN)?;
        log_fetched(&dataset);
        Ok(dataset)
    }
}

/// An upstream dataset already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl UpstreamSource for StaticSource {
    fn locator(&self) -> &str {
        "memory"
    }

    fn fetch(&self) -> Result<Dataset> {
        log_fetched(&self.dataset);
        Ok(self.dataset.clone())
    }
}

/// Pick a source for `locator`.
///
/// `http://` and `https://` locators are fetched over the network,
/// `file://` locators and bare paths are read from disk. Relative paths are
/// resolved against `root`.
pub fn source_for(locator: &str, root: &Path, timeout: Duration) -> Result<Box<dyn UpstreamSource>> {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        return Ok(Box::new(HttpSource::new(locator, timeout)?));
    }

    let path = Path::new(locator.strip_prefix("file://").unwrap_or(locator));
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    Ok(Box::new(FileSource::new(path)))
}
