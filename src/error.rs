//! Error types raised while reading site configuration or applying filters.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration faults. These are build-time problems and are never recovered from.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid YAML or JSON for the expected layout.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Path that caused the error.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// `to_cdnurl` was called in production mode without any CDN host configured.
    #[error("missing configuration key `app.cdn_hosts`: at least one CDN host is required")]
    EmptyCdnHosts,
    /// The configured release id contains something other than digits.
    #[error("malformed configuration key `app.release`: expected a numeric release id, got {value:?}")]
    InvalidRelease {
        /// Release value as written in the configuration.
        value: String,
    },
}

/// Errors raised by the named filter surface.
#[derive(Debug, Error)]
pub enum FilterError {
    /// No filter is registered under the requested name.
    #[error("unknown filter `{0}`")]
    UnknownFilter(String),
    /// The filter was called with arguments it does not accept.
    #[error("invalid arguments for `{filter}`: {message}")]
    InvalidArgument {
        /// Filter name.
        filter: &'static str,
        /// What was wrong with the arguments.
        message: String,
    },
    /// The filter needed configuration that is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
