use crate::config::SiteConfig;

/// Prefix a root-relative path with the site's base URL.
pub fn to_baseurl(config: &SiteConfig, input: &str) -> String {
    format!("{}{}", config.base_url, input)
}

/// Prefix a root-relative path with the site URL and base URL.
pub fn to_absurl(config: &SiteConfig, input: &str) -> String {
    format!("{}{}{}", config.url, config.base_url, input)
}
