//! Target manifest: the externally supplied list of files to synchronize.
//!
//! The manifest replaces a hard-coded path list so the substitution engine
//! stays decoupled from any particular project layout. Each `[[target]]`
//! entry names a file, its dialect, and optionally the encoding to assume
//! when the file has no byte-order mark.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::encoding::TextEncoding;
use crate::error::SyncError;
use crate::rules::Dialect;

/// A single file to synchronize.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    /// Path to the file.
    pub path: PathBuf,

    /// Rule table and fallback encoding selector.
    pub dialect: Dialect,

    /// Encoding assumed when the file carries no byte-order mark.
    /// Defaults to the dialect's usual encoding.
    #[serde(default)]
    pub encoding: Option<TextEncoding>,
}

impl Target {
    /// The encoding to assume for a file without a byte-order mark.
    pub fn fallback_encoding(&self) -> TextEncoding {
        self.encoding
            .unwrap_or_else(|| self.dialect.default_encoding())
    }
}

/// The ordered target list loaded from a TOML manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(rename = "target", default)]
    pub targets: Vec<Target>,
}

impl Manifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SyncError::Manifest(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| SyncError::Manifest(format!("{}: {}", path.display(), e)))
    }
}
