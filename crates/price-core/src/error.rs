//! Error types for price-core

/// Result type for price-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a synchronization run.
///
/// Every variant is fatal: when one is returned the output and hash files
/// have not been touched. Skipped aliases are not errors; they are reported
/// through [`crate::sync::SkippedAlias`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is missing, malformed, or fails validation
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Upstream dataset could not be retrieved
    #[error("Failed to fetch upstream {locator}: {message}")]
    Fetch { locator: String, message: String },

    /// A dataset payload is not a JSON object of model entries
    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from price-fs
    #[error(transparent)]
    Fs(#[from] price_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn fetch(locator: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            locator: locator.into(),
            message: message.to_string(),
        }
    }

    pub fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}
