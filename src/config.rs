//! Site configuration loader for the URL filters.
//!
//! The layout follows a Jekyll `_config.yml`: `url` and `baseurl` at the top level and the
//! CDN settings grouped under a user-defined `app` table.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::models::{Mode, ReleaseId};

/// Configuration files probed by [`SiteConfig::discover`], in order.
pub const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.json"];

/// Prefix placed in front of the release id when none is configured.
pub const DEFAULT_PREFIX: &str = "v";

/// Browsers gain little from spreading assets over more hosts than this.
pub const MAX_EXPECTED_HOSTS: usize = 4;

/// Immutable per-build site configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host of the deployed site, e.g. `http://example.com`.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Path the site is served under, e.g. `/blog`. May be empty.
    #[serde(rename = "baseurl", alias = "base_url", deserialize_with = "null_as_default")]
    pub base_url: String,
    /// CDN settings.
    #[serde(deserialize_with = "null_as_default")]
    pub app: AppConfig,
    /// Date the build started; the fallback source for the release id.
    #[serde(skip, default = "today")]
    pub build_date: NaiveDate,
}

/// The `app` table of the site configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CDN host names. Order matters: position `n` is shard `n`.
    #[serde(deserialize_with = "null_as_default")]
    pub cdn_hosts: Vec<String>,
    /// Cache-busting release id. Falls back to the build date as `%y%m%d`.
    pub release: Option<ReleaseId>,
    /// String placed in front of the release id. Falls back to [`DEFAULT_PREFIX`].
    pub prefix: Option<String>,
    /// Working state of the build.
    pub mode: Mode,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            base_url: String::new(),
            app: AppConfig::default(),
            build_date: today(),
        }
    }
}

impl SiteConfig {
    /// Look for a configuration file in `site_dir`.
    ///
    /// When no candidate exists the default configuration is returned. A candidate that
    /// exists but cannot be read or parsed is an error.
    pub fn discover(site_dir: &Path) -> Result<Self, ConfigError> {
        for name in CONFIG_FILES {
            let candidate = site_dir.join(name);
            if candidate.is_file() {
                return Self::from_path(&candidate);
            }
        }

        tracing::debug!(
            dir = %site_dir.display(),
            "no site configuration found, using defaults"
        );
        Ok(Self::default())
    }

    /// Read configuration from a specific file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content).map_err(|err| parse_error(path, err))?
        } else {
            Self::from_yaml_str(&content).map_err(|err| parse_error(path, err))?
        };

        config.warn_unusual_values(path);
        Ok(config)
    }

    fn warn_unusual_values(&self, path: &Path) {
        let hosts = self.app.cdn_hosts.len();
        if hosts > MAX_EXPECTED_HOSTS {
            tracing::warn!(
                config = %path.display(),
                hosts,
                "more than {MAX_EXPECTED_HOSTS} CDN hosts configured"
            );
        }
        if let Some(release) = &self.app.release {
            if release.is_numeric() && release.as_str().len() != 6 {
                tracing::warn!(
                    config = %path.display(),
                    release = %release,
                    "release id is expected to be 6 digits"
                );
            }
        }
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Parse configuration from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

impl SiteConfig {
    /// Replace the site URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Replace the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the CDN host list.
    pub fn with_cdn_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.app.cdn_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Pin the release id instead of deriving it from the build date.
    pub fn with_release(mut self, release: impl Into<ReleaseId>) -> Self {
        self.app.release = Some(release.into());
        self
    }

    /// Replace the release prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.app.prefix = Some(prefix.into());
        self
    }

    /// Replace the working mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.app.mode = mode;
        self
    }

    /// Replace the build date captured when the configuration was created.
    pub fn with_build_date(mut self, date: NaiveDate) -> Self {
        self.build_date = date;
        self
    }

    /// Release prefix with the default applied.
    pub fn prefix(&self) -> &str {
        self.app.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// Release id used for CDN URLs.
    ///
    /// A configured release is returned verbatim once it is known to be numeric; otherwise
    /// the build date is rendered as two-digit year, month and day.
    pub fn release(&self) -> Result<ReleaseId, ConfigError> {
        let Some(release) = &self.app.release else {
            return Ok(ReleaseId::new(self.build_date.format("%y%m%d").to_string()));
        };

        if !release.is_numeric() {
            return Err(ConfigError::InvalidRelease {
                value: release.as_str().to_string(),
            });
        }
        Ok(release.clone())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Parse {
        path: PathBuf::from(path),
        message: err.to_string(),
    }
}

/// Treat an explicit `null` (e.g. `baseurl:` with no value) like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
