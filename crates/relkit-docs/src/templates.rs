//! Shared page template rendering.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use minijinja::value::Value;
use minijinja::Environment;

use crate::header::Header;

/// The shared page template, loaded from disk once per build.
#[derive(Debug)]
pub struct PageTemplate {
    env: Environment<'static>,
}

/// Errors that can occur while loading or rendering the template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl PageTemplate {
    /// Load the page template from a file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|e| TemplateError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut env = Environment::new();
        env.add_template_owned("page.html".to_string(), source)?;

        Ok(Self { env })
    }

    /// Render a page: the converted HTML body plus every header field.
    ///
    /// The body is passed pre-rendered, so it is marked safe; header
    /// values go through normal escaping.
    pub fn render(&self, content: &str, header: &Header) -> Result<String, TemplateError> {
        let mut context: BTreeMap<String, Value> = BTreeMap::new();

        for (key, value) in &header.extra {
            context.insert(key.clone(), Value::from_serialize(value));
        }
        if let Some(title) = &header.title {
            context.insert("title".to_string(), Value::from(title.clone()));
        }
        if let Some(subtitle) = &header.subtitle {
            context.insert("subtitle".to_string(), Value::from(subtitle.clone()));
        }
        context.insert(
            "content".to_string(),
            Value::from_safe_string(content.to_string()),
        );

        let tmpl = self.env.get_template("page.html")?;
        Ok(tmpl.render(context)?)
    }
}
