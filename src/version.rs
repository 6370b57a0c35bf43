//! PDF versions and version gating.
//!
//! Constructs in the PDF format are introduced in a specific version. A
//! [`VersionGate`] names that version together with an optional, more tolerant
//! threshold used in relaxed validation, and resolves to the threshold that
//! actually applies for a given [`ValidationMode`].

use crate::config::ValidationMode;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// PDF version, ordered from oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Version {
    /// PDF 1.0
    V10,
    /// PDF 1.1
    V11,
    /// PDF 1.2
    V12,
    /// PDF 1.3
    V13,
    /// PDF 1.4
    V14,
    /// PDF 1.5
    V15,
    /// PDF 1.6
    V16,
    /// PDF 1.7
    V17,
    /// PDF 2.0
    V20,
}

impl Version {
    /// Parse a version string such as `"1.4"` or `"2.0"`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "1.0" => Ok(Version::V10),
            "1.1" => Ok(Version::V11),
            "1.2" => Ok(Version::V12),
            "1.3" => Ok(Version::V13),
            "1.4" => Ok(Version::V14),
            "1.5" => Ok(Version::V15),
            "1.6" => Ok(Version::V16),
            "1.7" => Ok(Version::V17),
            "2.0" => Ok(Version::V20),
            other => Err(Error::InvalidVersion(other.to_string())),
        }
    }

    /// Build a version from the `(major, minor)` pair of a `%PDF-x.y` header.
    pub fn from_header(major: u8, minor: u8) -> Result<Self> {
        Self::parse(&format!("{}.{}", major, minor))
    }

    /// The version string as written in a header or catalog `/Version`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V10 => "1.0",
            Version::V11 => "1.1",
            Version::V12 => "1.2",
            Version::V13 => "1.3",
            Version::V14 => "1.4",
            Version::V15 => "1.5",
            Version::V16 => "1.6",
            Version::V17 => "1.7",
            Version::V20 => "2.0",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Version threshold for one construct.
///
/// `strict` is the version that introduced the construct. `relaxed` is the
/// threshold used in [`ValidationMode::Relaxed`]; `None` disables the check in
/// that mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionGate {
    /// Threshold in strict mode
    pub strict: Version,
    /// Threshold in relaxed mode
    pub relaxed: Option<Version>,
}

impl VersionGate {
    /// Gate enforced only in strict mode.
    pub const fn since(version: Version) -> Self {
        Self {
            strict: version,
            relaxed: None,
        }
    }

    /// Use `version` as the threshold in relaxed mode too.
    pub const fn relaxed_to(mut self, version: Version) -> Self {
        self.relaxed = Some(version);
        self
    }

    /// Threshold that applies in `mode`, if any.
    pub fn resolve(&self, mode: ValidationMode) -> Option<Version> {
        match mode {
            ValidationMode::Strict => Some(self.strict),
            ValidationMode::Relaxed => self.relaxed,
            ValidationMode::None => None,
        }
    }
}

impl From<Version> for VersionGate {
    fn from(version: Version) -> Self {
        VersionGate::since(version)
    }
}
