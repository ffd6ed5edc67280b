//! Static asset and special file detection.

use regex::Regex;
use std::sync::LazyLock;

/// Paths that are always served as-is.
pub const SPECIAL_PATHS: [&str; 2] = ["/robots.txt", "/sitemap.xml"];

/// Image, stylesheet, script and font extensions served as-is.
static STATIC_EXTENSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(ico|png|jpg|jpeg|gif|css|js|svg|woff|woff2|ttf|eot)$").unwrap()
});

/// Returns whether `path` bypasses the redirect logic entirely.
///
/// Matching is case-sensitive: `/logo.PNG` is not treated as a static asset.
pub fn is_static_or_special(path: &str) -> bool {
    SPECIAL_PATHS.contains(&path) || STATIC_EXTENSION_REGEX.is_match(path)
}
