//! Documentation build command.

use std::path::PathBuf;

use anyhow::Result;
use relkit_docs::{DocsBuilder, DocsConfig};

/// Run the docs command.
pub fn run(
    source: PathBuf,
    output: PathBuf,
    template: PathBuf,
    stylesheet: PathBuf,
    license: PathBuf,
) -> Result<()> {
    tracing::info!("Building documentation...");

    let config = DocsConfig {
        source_dir: source,
        output_dir: output,
        template,
        stylesheet,
        license,
    };

    let report = DocsBuilder::new(config).build()?;

    tracing::info!("Built {} pages in {}ms", report.pages, report.duration_ms);
    tracing::info!("Output: {}", report.output_dir.display());

    Ok(())
}
