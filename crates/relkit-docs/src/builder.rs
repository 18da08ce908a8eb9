//! Documentation site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use pulldown_cmark::{html, Options, Parser};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::header::extract_header;
use crate::templates::{PageTemplate, TemplateError};

/// Configuration for building the documentation site.
///
/// Defaults mirror a build run from inside the docs directory: pages and
/// the template next to each other, output recreated in `output/`, the
/// license one level up.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Directory containing the markdown pages (top level only)
    pub source_dir: PathBuf,

    /// Output directory, deleted and recreated on every run
    pub output_dir: PathBuf,

    /// Path to the shared page template
    pub template: PathBuf,

    /// Stylesheet copied unmodified into the output
    pub stylesheet: PathBuf,

    /// License file copied unmodified into the output
    pub license: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("output"),
            template: PathBuf::from("template.html"),
            stylesheet: PathBuf::from("style.css"),
            license: PathBuf::from("../LICENSE.txt"),
        }
    }
}

/// Result of a build run.
#[derive(Debug)]
pub struct DocsReport {
    /// Number of pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("failed to read source directory: {0}")]
    Read(String),

    #[error("failed to parse header: {path}: {message}")]
    Header { path: String, message: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to write output: {0}")]
    Write(String),
}

/// Static documentation builder.
pub struct DocsBuilder {
    config: DocsConfig,
}

impl DocsBuilder {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    /// Build the site: render every page through the shared template and
    /// copy the stylesheet and license into the fresh output directory.
    pub fn build(&self) -> Result<DocsReport, DocsError> {
        let start = Instant::now();

        let template = PageTemplate::load(&self.config.template)?;

        // The output directory is rebuilt from scratch on every run.
        if self.config.output_dir.exists() {
            fs::remove_dir_all(&self.config.output_dir)
                .map_err(|e| DocsError::Write(e.to_string()))?;
        }
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| DocsError::Write(e.to_string()))?;

        let pages = self.discover_pages()?;

        let results: Vec<Result<(), DocsError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &template))
            .collect();
        for result in results {
            result?;
        }

        self.copy_assets()?;

        Ok(DocsReport {
            pages: pages.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover the markdown pages at the top level of the source directory.
    fn discover_pages(&self) -> Result<Vec<PathBuf>, DocsError> {
        if !self.config.source_dir.exists() {
            return Err(DocsError::Read(format!(
                "source directory not found: {}",
                self.config.source_dir.display()
            )));
        }

        let mut pages = Vec::new();
        for entry in WalkDir::new(&self.config.source_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            pages.push(path.to_path_buf());
        }

        // Directory iteration order is platform-dependent; sort for
        // deterministic logs.
        pages.sort();
        Ok(pages)
    }

    /// Render a single page and write it to the output directory.
    fn build_page(&self, page: &Path, template: &PageTemplate) -> Result<(), DocsError> {
        let source = fs::read_to_string(page)
            .map_err(|e| DocsError::Read(format!("{}: {}", page.display(), e)))?;

        let (header, body) = extract_header(&source).map_err(|e| DocsError::Header {
            path: page.display().to_string(),
            message: e.to_string(),
        })?;
        let header = header.unwrap_or_default();

        let content = render_markdown(body);
        let html = template.render(&content, &header)?;

        let stem = page
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let output_path = self.config.output_dir.join(format!("{}.html", stem));
        fs::write(&output_path, html).map_err(|e| DocsError::Write(e.to_string()))?;

        tracing::debug!("Rendered {}", output_path.display());
        Ok(())
    }

    /// Copy the stylesheet and license into the output, byte-for-byte.
    fn copy_assets(&self) -> Result<(), DocsError> {
        for asset in [&self.config.stylesheet, &self.config.license] {
            let filename = asset
                .file_name()
                .ok_or_else(|| DocsError::Read(format!("not a file: {}", asset.display())))?;
            fs::copy(asset, self.config.output_dir.join(filename)).map_err(|e| {
                DocsError::Write(format!("failed to copy {}: {}", asset.display(), e))
            })?;
        }
        Ok(())
    }
}

/// Convert markdown to HTML.
fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
