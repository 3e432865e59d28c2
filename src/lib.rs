#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filters;
pub mod logging;
pub mod models;
pub mod rewriter;
pub mod sharding;
pub mod versioning;

pub use config::{AppConfig, SiteConfig};
pub use error::{ConfigError, FilterError};
pub use filters::Filter;
pub use models::{Mode, ReleaseId};
pub use rewriter::UrlRewriter;
pub use sharding::{Crc32Sharding, HostSelection};
