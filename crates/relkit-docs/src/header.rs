//! Metadata header extraction and parsing.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Parsed metadata header from a documentation page.
///
/// Every key ends up in the template context, so unknown keys are kept
/// verbatim rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Header {
    /// Page title
    #[serde(default)]
    pub title: Option<String>,

    /// Page subtitle
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Any further keys, handed to the template as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Extract the `---`-delimited YAML header from a page.
///
/// A header is only recognized when the very first line of the page is
/// `---`. Returns the parsed header (None when the page has none) and the
/// markdown body that follows it.
pub fn extract_header(source: &str) -> Result<(Option<Header>, &str), HeaderError> {
    let Some(after_open) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return Ok((None, source));
    };

    // Find the closing ---
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(HeaderError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = after_open[close_pos + 4..]
        .trim_start_matches('\r')
        .trim_start_matches('\n');

    if yaml_content.is_empty() {
        return Ok((Some(Header::default()), remaining));
    }

    let header: Header = serde_yaml::from_str(yaml_content)
        .map_err(|e| HeaderError::InvalidYaml(e.to_string()))?;

    Ok((Some(header), remaining))
}

/// Errors that can occur when parsing a metadata header.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("unclosed metadata header - missing closing ---")]
    Unclosed,

    #[error("invalid YAML in metadata header: {0}")]
    InvalidYaml(String),
}
