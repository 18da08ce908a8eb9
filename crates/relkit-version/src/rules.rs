//! Anchor-scoped substitution rules, one table per file dialect.
//!
//! A rule matches a three-component numeric run only when it immediately
//! follows the rule's anchor token, and replaces just the run. The anchor
//! itself, trailing components (`FILEVERSION 1,2,3,0` keeps the `,0`), and
//! numeric text anywhere else on the line are never modified.

use regex::Regex;
use serde::Deserialize;

use crate::encoding::TextEncoding;
use crate::version::Version;

/// File dialect of a synchronization target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Native resource script: `FILEVERSION`/`PRODUCTVERSION` statements
    /// plus the string-table `FileVersion`/`ProductVersion` entries.
    ResourceScript,
    /// Managed assembly metadata: `AssemblyVersion` and
    /// `AssemblyFileVersion` attributes.
    AssemblyInfo,
}

impl Dialect {
    /// Encoding assumed when the file carries no byte-order mark.
    pub fn default_encoding(&self) -> TextEncoding {
        match self {
            Dialect::ResourceScript => TextEncoding::Utf16Le,
            Dialect::AssemblyInfo => TextEncoding::Utf8,
        }
    }

    /// The dialect's substitution rules, in application order.
    pub fn rules(&self) -> &'static [RuleSpec] {
        match self {
            Dialect::ResourceScript => RESOURCE_SCRIPT_RULES,
            Dialect::AssemblyInfo => ASSEMBLY_INFO_RULES,
        }
    }
}

/// How the three version components are joined at a given anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Comma,
    Dot,
}

/// An anchor token paired with the separator form of the triplet that
/// follows it.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub anchor: &'static str,
    pub separator: Separator,
}

const RESOURCE_SCRIPT_RULES: &[RuleSpec] = &[
    RuleSpec {
        anchor: "FILEVERSION ",
        separator: Separator::Comma,
    },
    RuleSpec {
        anchor: "PRODUCTVERSION ",
        separator: Separator::Comma,
    },
    RuleSpec {
        anchor: "\"FileVersion\", \"",
        separator: Separator::Dot,
    },
    RuleSpec {
        anchor: "\"ProductVersion\", \"",
        separator: Separator::Dot,
    },
];

const ASSEMBLY_INFO_RULES: &[RuleSpec] = &[
    RuleSpec {
        anchor: "AssemblyVersion(\"",
        separator: Separator::Dot,
    },
    RuleSpec {
        anchor: "AssemblyFileVersion(\"",
        separator: Separator::Dot,
    },
];

/// A rule compiled against a concrete new version.
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn compile(spec: &RuleSpec, version: &Version) -> Self {
        let sep = match spec.separator {
            Separator::Comma => ",",
            Separator::Dot => r"\.",
        };
        let pattern = format!(
            r"(?P<anchor>{anchor})\d+{sep}\d+{sep}\d+",
            anchor = regex::escape(spec.anchor),
            sep = sep,
        );
        let triplet = match spec.separator {
            Separator::Comma => version.commas(),
            Separator::Dot => version.dotted(),
        };

        Self {
            pattern: Regex::new(&pattern).expect("rule patterns are built from static anchors"),
            replacement: format!("${{anchor}}{}", triplet),
        }
    }

    /// Rewrite every anchored triplet in a line.
    pub fn apply(&self, line: &str) -> String {
        self.pattern
            .replace_all(line, self.replacement.as_str())
            .into_owned()
    }
}

/// Compile a dialect's full rule table against a new version.
pub fn compile_rules(dialect: Dialect, version: &Version) -> Vec<Rule> {
    dialect
        .rules()
        .iter()
        .map(|spec| Rule::compile(spec, version))
        .collect()
}
