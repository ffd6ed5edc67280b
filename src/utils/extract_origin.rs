//! Request origin extraction and redirect `Location` building.

use axum::http::{HeaderMap, HeaderName, Uri, header};
use url::Url;

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// How the scheme and host of the public origin are determined.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    /// Trust `X-Forwarded-Host` / `X-Forwarded-Proto` set by a reverse proxy.
    pub behind_proxy: bool,
    /// Scheme used when it is not taken from a proxy header.
    pub default_scheme: String,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self {
            behind_proxy: false,
            default_scheme: "https".to_string(),
        }
    }
}

/// Extracts the public origin (`scheme://host[:port]`) of a request.
///
/// The host comes from `Host`, or from the first `X-Forwarded-Host` entry
/// when the policy trusts proxy headers. HTTP/2 requests usually carry no
/// `Host`; their `:authority` (the request URI's authority) is used instead.
/// Returns `None` if no usable host is present.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "example.com:8080".parse().unwrap());
///
/// let origin = extract_origin(&headers, &Uri::from_static("/"), &OriginPolicy::default()).unwrap();
/// assert_eq!(origin.as_str(), "https://example.com:8080/");
/// ```
pub fn extract_origin(headers: &HeaderMap, uri: &Uri, policy: &OriginPolicy) -> Option<Url> {
    let forwarded = |name: &HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let host = policy
        .behind_proxy
        .then(|| forwarded(&X_FORWARDED_HOST))
        .flatten()
        .or_else(|| headers.get(header::HOST).and_then(|v| v.to_str().ok()))
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .or_else(|| uri_authority(uri))?;

    let scheme = policy
        .behind_proxy
        .then(|| forwarded(&X_FORWARDED_PROTO))
        .flatten()
        .filter(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
        .unwrap_or(policy.default_scheme.as_str())
        .to_ascii_lowercase();

    let origin = Url::parse(&format!("{}://{}/", scheme, host)).ok()?;
    origin.host_str()?;
    Some(origin)
}

/// `host[:port]` of an absolute request URI, without any userinfo.
fn uri_authority(uri: &Uri) -> Option<String> {
    let authority = uri.authority()?;
    Some(match authority.port_u16() {
        Some(port) => format!("{}:{}", authority.host(), port),
        None => authority.host().to_string(),
    })
}

/// Resolves a redirect target path against the request origin.
///
/// Falls back to the bare path (a relative `Location`) when the origin is
/// unknown. The path replaces the origin's path verbatim, so targets such as
/// `//evil.example` stay on the request host.
pub fn redirect_location(origin: Option<&Url>, target: &str) -> String {
    match origin {
        Some(origin) => {
            let mut url = origin.clone();
            url.set_path(target);
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        None => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    fn path_only() -> Uri {
        Uri::from_static("/")
    }

    fn proxy_policy() -> OriginPolicy {
        OriginPolicy {
            behind_proxy: true,
            default_scheme: "https".to_string(),
        }
    }

    #[test]
    fn test_extract_origin_simple() {
        let origin = extract_origin(&headers(&[("host", "example.com")]), &path_only(), &OriginPolicy::default());
        assert_eq!(origin.unwrap().as_str(), "https://example.com/");
    }

    #[test]
    fn test_extract_origin_keeps_port() {
        let origin = extract_origin(
            &headers(&[("host", "localhost:8787")]),
            &path_only(),
            &OriginPolicy::default(),
        );
        assert_eq!(origin.unwrap().as_str(), "https://localhost:8787/");
    }

    #[test]
    fn test_extract_origin_ipv6() {
        let origin = extract_origin(&headers(&[("host", "[::1]:8080")]), &path_only(), &OriginPolicy::default());
        assert_eq!(origin.unwrap().as_str(), "https://[::1]:8080/");
    }

    #[test]
    fn test_extract_origin_missing_host() {
        assert!(extract_origin(&HeaderMap::new(), &path_only(), &OriginPolicy::default()).is_none());
    }

    #[test]
    fn test_extract_origin_from_uri_authority() {
        let uri = Uri::from_static("https://user@www.example.com:8443/blog");

        let origin = extract_origin(&HeaderMap::new(), &uri, &OriginPolicy::default()).unwrap();

        assert_eq!(origin.as_str(), "https://www.example.com:8443/");
    }

    #[test]
    fn test_host_header_wins_over_uri_authority() {
        let uri = Uri::from_static("https://authority.example/blog");

        let origin = extract_origin(
            &headers(&[("host", "www.example.com")]),
            &uri,
            &OriginPolicy::default(),
        )
        .unwrap();

        assert_eq!(origin.host_str(), Some("www.example.com"));
    }

    #[test]
    fn test_extract_origin_invalid_host() {
        let origin = extract_origin(&headers(&[("host", "bad host")]), &path_only(), &OriginPolicy::default());
        assert!(origin.is_none());
    }

    #[test]
    fn test_forwarded_headers_ignored_without_proxy() {
        let map = headers(&[
            ("host", "internal:8080"),
            ("x-forwarded-host", "www.example.com"),
            ("x-forwarded-proto", "http"),
        ]);

        let origin = extract_origin(&map, &path_only(), &OriginPolicy::default()).unwrap();
        assert_eq!(origin.as_str(), "https://internal:8080/");
    }

    #[test]
    fn test_forwarded_headers_behind_proxy() {
        let map = headers(&[
            ("host", "internal:8080"),
            ("x-forwarded-host", "www.example.com, proxy.local"),
            ("x-forwarded-proto", "http"),
        ]);

        let origin = extract_origin(&map, &path_only(), &proxy_policy()).unwrap();
        assert_eq!(origin.as_str(), "http://www.example.com/");
    }

    #[test]
    fn test_unknown_forwarded_proto_uses_default() {
        let map = headers(&[("host", "example.com"), ("x-forwarded-proto", "gopher")]);

        let origin = extract_origin(&map, &path_only(), &proxy_policy()).unwrap();
        assert_eq!(origin.scheme(), "https");
    }

    #[test]
    fn test_redirect_location_absolute() {
        let origin = Url::parse("https://example.com/").unwrap();
        assert_eq!(
            redirect_location(Some(&origin), "/blog/"),
            "https://example.com/blog/"
        );
    }

    #[test]
    fn test_redirect_location_drops_default_port() {
        let origin = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(
            redirect_location(Some(&origin), "/blog"),
            "https://example.com/blog"
        );
    }

    #[test]
    fn test_redirect_location_stays_on_host() {
        let origin = Url::parse("https://example.com/").unwrap();
        let location = redirect_location(Some(&origin), "//evil.example/x");
        assert!(location.starts_with("https://example.com/"));
    }

    #[test]
    fn test_redirect_location_relative_without_origin() {
        assert_eq!(redirect_location(None, "/blog/"), "/blog/");
    }
}
