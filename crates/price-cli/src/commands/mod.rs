//! Command implementations for price-cli

pub mod check;
pub mod sync;

use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

pub use check::run_check;
pub use sync::run_sync;

/// Canonicalize the repository root, which must be an existing directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = dunce::canonicalize(path).map_err(|e| {
        CliError::user(format!(
            "Repository root '{}' is not accessible: {}",
            path.display(),
            e
        ))
    })?;
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "Repository root '{}' is not a directory",
            root.display()
        )));
    }
    Ok(root)
}
