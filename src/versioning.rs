//! Origin-side counterpart of the virtual versioned URLs built by
//! [`to_cdnurl`](crate::rewriter::to_cdnurl).
//!
//! CDN URLs carry a `<prefix><release>/` segment that has no directory behind it. The
//! origin has to drop that segment before resolving the file, typically with an Apache
//! rewrite rule. The helpers here render that rule and apply the same mapping in Rust.

/// Number of digits in a release id recognised by the rewrite rule.
pub const RELEASE_DIGITS: usize = 6;

/// Apache `RewriteRule` that maps `/<prefix>NNNNNN/<path>` back to `/<path>`.
pub fn rewrite_rule(prefix: &str) -> String {
    format!(
        "RewriteRule ^{}[0-9]{{{RELEASE_DIGITS},{RELEASE_DIGITS}}}/(.*)$ /$1 [L]",
        regex::escape(prefix)
    )
}

/// Strip the virtual version segment from `path`.
///
/// Accepts the path with or without its leading slash and returns the real root-relative
/// path, or `None` when `path` does not start with `<prefix>` followed by exactly
/// [`RELEASE_DIGITS`] digits and a slash.
pub fn strip_virtual_version<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    let relative = path.strip_prefix('/').unwrap_or(path);
    let versioned = relative.strip_prefix(prefix)?;
    let (release, rest) = versioned.split_at_checked(RELEASE_DIGITS)?;

    if !release.bytes().all(|b| b.is_ascii_digit()) || !rest.starts_with('/') {
        return None;
    }
    Some(rest)
}
