use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::SiteConfig;

/// Thumbnail size used by [`sub_imgurl`] when none is given.
pub const DEFAULT_IMAGE_SIZE: &str = "150x150";

/// `href="/x"` or `src="/x"`, but not the protocol-relative `href="//host"`.
///
/// The character after the slash is captured so it can be put back; a slash at the very
/// end of the input still matches.
fn root_relative_attribute() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(href|src)="/([^/]|$)"#).expect("invalid root-relative attribute regex")
    })
}

fn protocol_relative_attribute() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(href|src)="//"#).expect("invalid protocol-relative attribute regex")
    })
}

fn image_extension() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.(jpg|png|gif)").expect("invalid image extension regex"))
}

fn prefix_root_relative(input: &str, prefix: &str) -> String {
    root_relative_attribute()
        .replace_all(input, |caps: &Captures| {
            format!("{}=\"{prefix}/{}", &caps[1], &caps[2])
        })
        .into_owned()
}

/// Prepend the base URL to every root-relative `href` and `src` attribute in `input`.
pub fn sub_baseurl(config: &SiteConfig, input: &str) -> String {
    prefix_root_relative(input, &config.base_url)
}

/// Turn every `href` and `src` attribute in `input` into an absolute URL.
///
/// Protocol-relative references gain an `http:` scheme first; the remaining root-relative
/// ones are then prefixed with the site URL and base URL. The order matters: running the
/// second pass first would treat `//host` as a path on the site.
pub fn sub_absurl(config: &SiteConfig, input: &str) -> String {
    let with_scheme = protocol_relative_attribute().replace_all(input, r#"${1}="http://"#);
    let prefix = format!("{}{}", config.url, config.base_url);
    prefix_root_relative(&with_scheme, &prefix)
}

/// Insert `_<size>` (and `@2x` when `hires` is `Some(true)`) before the first `.jpg`, `.png`
/// or `.gif` in `input`. Later extensions are left alone.
pub fn sub_imgurl(input: &str, size: Option<&str>, hires: Option<bool>) -> String {
    let size = size.unwrap_or(DEFAULT_IMAGE_SIZE);
    let density = if hires == Some(true) { "@2x" } else { "" };
    image_extension()
        .replace(input, |caps: &Captures| {
            format!("_{size}{density}.{}", &caps[1])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig::default()
            .with_url("http://example.com")
            .with_base_url("/blog")
    }

    #[test]
    fn base_url_is_added_to_every_root_relative_attribute() {
        let html = r#"<a href="/about/">About</a><img src="/img/a.png"><a href="/">Home</a>"#;
        assert_eq!(
            sub_baseurl(&config(), html),
            r#"<a href="/blog/about/">About</a><img src="/blog/img/a.png"><a href="/blog/">Home</a>"#
        );
    }

    #[test]
    fn base_url_skips_protocol_relative_and_external_links() {
        let html = r#"<script src="//cdn.example.com/x.js"></script><a href="https://x.org/">"#;
        assert_eq!(sub_baseurl(&config(), html), html);
    }

    #[test]
    fn base_url_only_touches_href_and_src_suffixes() {
        let html = r#"<form action="/search" data-src="/x">"#;
        assert_eq!(
            sub_baseurl(&config(), html),
            r#"<form action="/search" data-src="/blog/x">"#
        );
    }

    #[test]
    fn absolute_url_adds_scheme_to_protocol_relative_links() {
        assert_eq!(
            sub_absurl(&config(), r#"href="//cdn.example.com/x""#),
            r#"href="http://cdn.example.com/x""#
        );
    }

    #[test]
    fn absolute_url_prefixes_root_relative_links() {
        assert_eq!(
            sub_absurl(&config(), r#"src="/img/a.png""#),
            r#"src="http://example.com/blog/img/a.png""#
        );
    }

    #[test]
    fn absolute_url_handles_mixed_markup() {
        let html = r#"<link href="//fonts.example.net/a.css"><img src="/a.gif"><a href="/">"#;
        assert_eq!(
            sub_absurl(&config(), html),
            r#"<link href="http://fonts.example.net/a.css"><img src="http://example.com/blog/a.gif"><a href="http://example.com/blog/">"#
        );
    }

    #[test]
    fn dollar_signs_in_config_are_inserted_literally() {
        let config = SiteConfig::default().with_base_url("/$1");
        assert_eq!(sub_baseurl(&config, r#"src="/a.png""#), r#"src="/$1/a.png""#);
    }

    #[test]
    fn image_size_defaults_to_thumbnail() {
        assert_eq!(sub_imgurl("/img/dog.jpg", None, None), "/img/dog_150x150.jpg");
    }

    #[test]
    fn image_size_with_hires_suffix() {
        assert_eq!(
            sub_imgurl("/img/dog.jpg", Some("300x300"), Some(true)),
            "/img/dog_300x300@2x.jpg"
        );
        assert_eq!(
            sub_imgurl("/img/dog.jpg", Some("300x300"), Some(false)),
            "/img/dog_300x300.jpg"
        );
    }

    #[test]
    fn only_first_image_extension_is_rewritten() {
        assert_eq!(
            sub_imgurl("/a.png /b.gif", None, None),
            "/a_150x150.png /b.gif"
        );
    }

    #[test]
    fn non_image_paths_are_unchanged() {
        assert_eq!(sub_imgurl("/docs/readme.txt", None, Some(true)), "/docs/readme.txt");
    }
}
