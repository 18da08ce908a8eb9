//! Version propagation command.

use std::path::Path;

use anyhow::{Context, Result};
use relkit_version::{Manifest, Synchronizer, Version};

/// Run the set-version command.
pub fn run(version: &str, manifest_path: &Path) -> Result<()> {
    // Validated before any file is touched.
    let version = Version::parse(version)?;

    let manifest = Manifest::load(manifest_path)
        .with_context(|| format!("cannot load target manifest {}", manifest_path.display()))?;

    tracing::info!(
        "Setting version {} across {} targets",
        version,
        manifest.targets.len()
    );

    let report = Synchronizer::new(manifest).synchronize(&version)?;

    tracing::info!(
        "Synchronized {} files ({} changed)",
        report.files.len(),
        report.changed
    );

    Ok(())
}
