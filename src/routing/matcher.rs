//! Path predicates used by the activation resolver.
//!
//! # Responsibilities
//! - Normalize pathnames (trailing slash, empty input)
//! - Exact match between a location and a route path
//! - Descendant match on a `/` boundary
//! - Canonical (percent-encoded, dot-free) form for hrefs and route paths
//!
//! # Design Decisions
//! - Matching is case-sensitive
//! - A missing side never matches (no panic, no default)
//! - Boundary check on `/` so `/meals` never falls under `/meal`
//! - The root route has no descendants

use url::Url;

/// Normalize a pathname.
///
/// `None` and `""` become `"/"`. A single trailing slash is stripped, except on
/// the root itself.
pub fn normalize(path: Option<&str>) -> String {
    match path {
        None | Some("") | Some("/") => "/".to_string(),
        Some(p) => p.strip_suffix('/').unwrap_or(p).to_string(),
    }
}

/// True iff both paths normalize to the same string.
pub fn is_exact_match(location: Option<&str>, route_path: Option<&str>) -> bool {
    match (location, route_path) {
        (Some(loc), Some(path)) => normalize(Some(loc)) == normalize(Some(path)),
        _ => false,
    }
}

/// True iff `location` lies strictly below `route_path`.
pub fn is_descendant(location: Option<&str>, route_path: Option<&str>) -> bool {
    let (Some(loc), Some(path)) = (location, route_path) else {
        return false;
    };
    let loc = normalize(Some(loc));
    let path = normalize(Some(path));
    if loc == path {
        return false;
    }
    loc.strip_prefix(path.as_str())
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Base that absolute-path hrefs are joined onto. Only its path survives.
const HREF_BASE: &str = "http://localhost/";

/// Canonical form of an absolute pathname: percent-encoded, dot segments
/// resolved, query and fragment dropped, then normalized.
///
/// Anything that does not start with `/` is returned unchanged so strict
/// callers can still reject it.
pub fn canonical_path(path: &str) -> String {
    if !path.starts_with('/') {
        return path.to_string();
    }
    match Url::parse(HREF_BASE).and_then(|base| base.join(path)) {
        Ok(url) => normalize(Some(url.path())),
        Err(_) => normalize(Some(strip_suffixes(path))),
    }
}

/// Reduce an href handed over by a hosting application to a bare pathname.
///
/// Absolute URLs and absolute-path hrefs come out in the same canonical form
/// as [`canonical_path`]. Other relative hrefs only lose `?query` and
/// `#fragment`.
pub fn location_from_href(href: &str) -> String {
    if let Ok(url) = Url::parse(href) {
        if url.has_host() {
            return normalize(Some(url.path()));
        }
    }
    if href.starts_with('/') {
        return canonical_path(href);
    }
    strip_suffixes(href).to_string()
}

fn strip_suffixes(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}
