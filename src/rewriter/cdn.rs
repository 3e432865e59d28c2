use crate::config::SiteConfig;
use crate::error::ConfigError;
use crate::models::Mode;
use crate::sharding::{HostSelection, select_host};

use super::prefix::to_baseurl;

/// Build a "virtual versioned" CDN URL for a root-relative asset path.
///
/// The result has the shape `//<host><baseurl>/<prefix><release><input>`. The host is picked
/// by `sharding` from `app.cdn_hosts`, so the same path lands on the same host for as long
/// as the path and the host list stay unchanged. The release segment does not exist on
/// disk; the origin strips it (see [`crate::versioning`]) and changing it forces every edge
/// to re-fetch.
///
/// In development mode the CDN is bypassed entirely and the base URL form is returned,
/// without consulting the host list or the release.
pub fn to_cdnurl<S: HostSelection + ?Sized>(
    config: &SiteConfig,
    sharding: &S,
    input: &str,
) -> Result<String, ConfigError> {
    if config.app.mode == Mode::Development {
        return Ok(to_baseurl(config, input));
    }

    let (index, host) =
        select_host(sharding, input, &config.app.cdn_hosts).ok_or(ConfigError::EmptyCdnHosts)?;
    let release = config.release()?;
    let prefix = config.prefix();

    tracing::debug!(
        input,
        host,
        host_index = index,
        host_count = config.app.cdn_hosts.len(),
        release = %release,
        "resolved CDN url"
    );

    Ok(format!(
        "//{host}{}/{prefix}{release}{input}",
        config.base_url
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sharding::Crc32Sharding;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const HOSTS: [&str; 4] = [
        "d0.cloudfront.net",
        "d1.cloudfront.net",
        "d2.cloudfront.net",
        "d3.cloudfront.net",
    ];

    fn production(hosts: &[&str]) -> SiteConfig {
        SiteConfig::default()
            .with_base_url("/blog")
            .with_cdn_hosts(hosts.iter().copied())
            .with_release(250115u32)
            .with_mode(Mode::Production)
    }

    fn cdn(config: &SiteConfig, input: &str) -> Result<String, ConfigError> {
        to_cdnurl(config, &Crc32Sharding, input)
    }

    #[test]
    fn builds_versioned_url_on_sharded_host() {
        let config = production(&HOSTS);
        assert_eq!(
            cdn(&config, "/img/dog.jpg").unwrap(),
            "//d2.cloudfront.net/blog/v250115/img/dog.jpg"
        );
        assert_eq!(
            cdn(&config, "/img/cat.png").unwrap(),
            "//d3.cloudfront.net/blog/v250115/img/cat.png"
        );
        assert_eq!(
            cdn(&config, "/css/site.css").unwrap(),
            "//d1.cloudfront.net/blog/v250115/css/site.css"
        );
    }

    #[test]
    fn single_host_serves_everything() {
        let config = production(&HOSTS[..1]).with_base_url("");
        assert_eq!(
            cdn(&config, "/js/app.js").unwrap(),
            "//d0.cloudfront.net/v250115/js/app.js"
        );
    }

    #[test]
    fn release_defaults_to_build_date() {
        let mut config = production(&HOSTS)
            .with_build_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        config.app.release = None;
        assert_eq!(
            cdn(&config, "/img/dog.jpg").unwrap(),
            "//d2.cloudfront.net/blog/v250115/img/dog.jpg"
        );
    }

    #[test]
    fn custom_prefix_replaces_v() {
        let config = production(&HOSTS).with_prefix("rel-");
        assert_eq!(
            cdn(&config, "/img/dog.jpg").unwrap(),
            "//d2.cloudfront.net/blog/rel-250115/img/dog.jpg"
        );
    }

    #[test]
    fn unknown_modes_build_for_production() {
        let config = production(&HOSTS).with_mode(Mode::from("staging"));
        assert!(cdn(&config, "/img/dog.jpg").unwrap().starts_with("//"));
    }

    #[test]
    fn empty_host_list_is_a_config_error() {
        let config = production(&[]);
        let err = cdn(&config, "/img/dog.jpg").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCdnHosts));
        assert!(err.to_string().contains("app.cdn_hosts"));
    }

    #[test]
    fn malformed_release_is_a_config_error() {
        let config = production(&HOSTS).with_release("next");
        assert!(matches!(
            cdn(&config, "/img/dog.jpg"),
            Err(ConfigError::InvalidRelease { .. })
        ));
    }

    #[test]
    fn development_mode_bypasses_the_cdn() {
        let config = production(&HOSTS).with_mode(Mode::Development);
        assert_eq!(cdn(&config, "/img/dog.jpg").unwrap(), "/blog/img/dog.jpg");

        let bare = SiteConfig::default()
            .with_base_url("/blog")
            .with_release("not-a-number")
            .with_mode(Mode::Development);
        assert_eq!(cdn(&bare, "/img/dog.jpg").unwrap(), "/blog/img/dog.jpg");
    }

    fn host_of(url: &str) -> &str {
        url.trim_start_matches("//").split('/').next().unwrap_or_default()
    }

    proptest! {
        #[test]
        fn output_is_stable_for_fixed_inputs(input in "/[a-z0-9/._-]{0,40}", hosts in 1usize..=4) {
            let config = production(&HOSTS[..hosts]);
            let first = cdn(&config, &input).unwrap();
            let second = cdn(&config, &input).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn exactly_one_configured_host_is_used(input in ".{0,40}", hosts in 1usize..=4) {
            let config = production(&HOSTS[..hosts]);
            let url = cdn(&config, &input).unwrap();
            let host = host_of(&url);
            prop_assert_eq!(HOSTS[..hosts].iter().filter(|h| **h == host).count(), 1);
            let expected = HOSTS[Crc32Sharding::checksum(&input) as usize % hosts];
            prop_assert_eq!(host, expected);
        }

        #[test]
        fn release_changes_path_but_not_host(input in "/[a-z0-9/._-]{0,40}", hosts in 1usize..=4) {
            let before = production(&HOSTS[..hosts]);
            let after = production(&HOSTS[..hosts]).with_release(260301u32);
            let old = cdn(&before, &input).unwrap();
            let new = cdn(&after, &input).unwrap();
            prop_assert_eq!(host_of(&old), host_of(&new));
            prop_assert_ne!(old, new);
        }

        #[test]
        fn development_is_always_base_url(input in ".{0,40}", hosts in 0usize..=4) {
            let config = production(&HOSTS[..hosts]).with_mode(Mode::Development);
            prop_assert_eq!(cdn(&config, &input).unwrap(), format!("/blog{input}"));
        }
    }
}
