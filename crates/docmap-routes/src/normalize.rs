//! URL path normalization.

/// Normalize a URL path for route matching.
///
/// Collapses duplicate slashes, strips the trailing slash (except for the
/// root `/`), and ensures a leading slash. The empty string normalizes to
/// the root.
///
/// Examples:
/// - `"/"` -> `"/"`
/// - `"/docs/"` -> `"/docs"`
/// - `"docs//intro"` -> `"/docs/intro"`
/// - `""` -> `"/"`
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if normalized.len() > 1 {
            normalized.push('/');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Check whether `prefix` is a segment-boundary prefix of `path`.
///
/// `/docs` is a prefix of `/docs` and `/docs/intro`, but not of `/docsx`.
/// The root `/` is a prefix of every path. Both arguments must already be
/// normalized.
pub(crate) fn is_path_prefix(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
