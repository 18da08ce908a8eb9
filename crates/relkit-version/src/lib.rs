//! Version propagation across platform resource files.
//!
//! This crate rewrites embedded version triplets in native resource
//! descriptors and managed assembly metadata, preserving every byte of
//! surrounding content including encoding and byte-order marks. Targets are
//! listed in a TOML manifest; substitutions are anchor-scoped so unrelated
//! numeric text is never touched.

pub mod encoding;
pub mod error;
pub mod manifest;
pub mod rules;
pub mod sync;
pub mod version;

pub use encoding::{FileEncoding, TextEncoding};
pub use error::{Result, SyncError};
pub use manifest::{Manifest, Target};
pub use rules::Dialect;
pub use sync::{SyncReport, Synchronizer};
pub use version::Version;
