//! Version string parsing and rendering.

use std::fmt;
use std::str::FromStr;

use crate::error::SyncError;

/// A plain `major.minor.patch` version triplet.
///
/// Parsing is structural: the string must carry exactly three numeric
/// components separated by dots, with no pre-release or build metadata.
/// `10.0.0` is accepted; `1.2`, `1x2x3` and `1.2.3-rc1` are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Version {
    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self, SyncError> {
        let parsed = semver::Version::parse(input.trim())
            .map_err(|_| SyncError::InvalidVersion(input.to_string()))?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(SyncError::InvalidVersion(input.to_string()));
        }

        Ok(Self {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
        })
    }

    /// Dot-separated rendering, e.g. `1.2.3`.
    pub fn dotted(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Comma-separated rendering, e.g. `1,2,3`, as used by the numeric
    /// version lists in resource scripts.
    pub fn commas(&self) -> String {
        format!("{},{},{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
