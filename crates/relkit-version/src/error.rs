//! Error types for version synchronization.

use std::path::PathBuf;

use crate::encoding::DecodeError;

/// Result type alias for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while propagating a version.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("invalid version {0:?}: expected major.minor.patch")]
    InvalidVersion(String),

    #[error("failed to load target manifest: {0}")]
    Manifest(String),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_path() {
        let err = SyncError::Read {
            path: PathBuf::from("app.rc"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("app.rc"));
    }
}
