//! Template filters that turn root-relative paths into site, absolute or CDN URLs.
//!
//! Every filter is a pure function of its input and the read-only [`SiteConfig`], so a
//! single [`UrlRewriter`] can be shared freely across rendering threads. The submodules
//! keep the prefix helpers, the CDN scheme, the attribute substitutions and the slug
//! transform separately testable.

mod cdn;
mod prefix;
mod slug;
mod substitute;

pub use cdn::to_cdnurl;
pub use prefix::{to_absurl, to_baseurl};
pub use slug::sanitize_str;
pub use substitute::{DEFAULT_IMAGE_SIZE, sub_absurl, sub_baseurl, sub_imgurl};

use crate::config::SiteConfig;
use crate::error::ConfigError;
use crate::sharding::{Crc32Sharding, HostSelection};

/// Filter set bound to one site configuration.
#[derive(Debug, Clone)]
pub struct UrlRewriter<'a, S = Crc32Sharding> {
    config: &'a SiteConfig,
    sharding: S,
}

impl<'a> UrlRewriter<'a> {
    /// Create a rewriter using the CRC-32 shard policy.
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            sharding: Crc32Sharding,
        }
    }
}

impl<'a, S: HostSelection> UrlRewriter<'a, S> {
    /// Swap the policy used to pick CDN hosts.
    pub fn with_sharding<T: HostSelection>(self, sharding: T) -> UrlRewriter<'a, T> {
        UrlRewriter {
            config: self.config,
            sharding,
        }
    }

    /// Configuration the filters read from.
    pub fn config(&self) -> &'a SiteConfig {
        self.config
    }

    /// `baseurl + input`.
    pub fn to_baseurl(&self, input: &str) -> String {
        to_baseurl(self.config, input)
    }

    /// `url + baseurl + input`.
    pub fn to_absurl(&self, input: &str) -> String {
        to_absurl(self.config, input)
    }

    /// Versioned CDN URL for `input`, or the base URL in development mode.
    pub fn to_cdnurl(&self, input: &str) -> Result<String, ConfigError> {
        to_cdnurl(self.config, &self.sharding, input)
    }

    /// Prepend `baseurl` to every root-relative `href`/`src` attribute.
    pub fn sub_baseurl(&self, input: &str) -> String {
        sub_baseurl(self.config, input)
    }

    /// Make every `href`/`src` attribute absolute.
    pub fn sub_absurl(&self, input: &str) -> String {
        sub_absurl(self.config, input)
    }

    /// Insert an image size suffix before the first image extension.
    pub fn sub_imgurl(&self, input: &str, size: Option<&str>, hires: Option<bool>) -> String {
        sub_imgurl(input, size, hires)
    }

    /// URL-safe slug of `input`.
    pub fn sanitize_str(&self, input: &str) -> String {
        sanitize_str(input)
    }
}
