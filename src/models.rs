//! Value types carried by the site configuration.

use std::fmt;

use serde::Deserialize;

/// Working state of the site build.
///
/// Only the literal `development` selects [`Mode::Development`]; every other value,
/// including a missing key, builds for production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Mode {
    /// Local work: asset URLs stay on the site itself and never touch the CDN.
    Development,
    /// Shipping build: asset URLs point at the CDN hosts.
    #[default]
    Production,
}

impl Mode {
    /// Name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        Mode::from(value.as_str())
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        if value == "development" {
            Mode::Development
        } else {
            Mode::Production
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release id exactly as written in the configuration.
///
/// Both `release: 250115` and `release: "250115"` are accepted. The text is kept verbatim
/// and only checked when a CDN URL is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRelease")]
pub struct ReleaseId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRelease {
    Number(u64),
    Text(String),
}

impl From<RawRelease> for ReleaseId {
    fn from(raw: RawRelease) -> Self {
        match raw {
            RawRelease::Number(value) => ReleaseId(value.to_string()),
            RawRelease::Text(value) => ReleaseId(value),
        }
    }
}

impl ReleaseId {
    /// Wrap a release id supplied by the caller.
    pub fn new(value: impl Into<String>) -> Self {
        ReleaseId(value.into())
    }

    /// Raw release text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the release is a non-empty run of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl From<u32> for ReleaseId {
    fn from(value: u32) -> Self {
        ReleaseId(value.to_string())
    }
}

impl From<&str> for ReleaseId {
    fn from(value: &str) -> Self {
        ReleaseId::new(value)
    }
}

impl From<String> for ReleaseId {
    fn from(value: String) -> Self {
        ReleaseId::new(value)
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
