//! Remote-path helpers shared across host abstractions and the runtime.

use percent_encoding::percent_decode_str;

/// Canonical cache key for a remote collection path.
///
/// Repeated slashes collapse and `.`/`..` segments resolve. The trailing slash that marks a
/// collection is dropped, so `/docs/` and `/docs` key the same listing. Percent-encoded segments
/// stay encoded, and a backslash is an ordinary character in a DAV path.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.trim().split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Joins `name` onto `base` with exactly one separator between them.
pub fn join_path(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    format!("{base}/{name}")
}

/// Splits a resource path at its final `/` into `(parent, file)`.
///
/// A trailing `/` stays attached to the file segment, so `/a/dir/` splits into `("/a", "dir/")`.
/// Returns `None` when there is no `/` or the final segment is empty.
pub fn split_resource(path: &str) -> Option<(&str, &str)> {
    let searchable = path.strip_suffix('/').unwrap_or(path);
    let idx = searchable.rfind('/')?;
    if idx + 1 >= searchable.len() {
        return None;
    }
    Some((&path[..idx], &path[idx + 1..]))
}

/// Final non-empty segment of `path`, ignoring a trailing `/`.
pub fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Normalized parent directory of `path` (`/` for top-level resources).
pub fn parent_path(path: &str) -> String {
    let normalized = normalize_path(path);
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Strips a leading page origin (`scheme://host[:port]`) from `url`.
pub fn strip_origin<'a>(url: &'a str, origin: &str) -> &'a str {
    if origin.is_empty() {
        return url;
    }
    url.strip_prefix(origin.trim_end_matches('/')).unwrap_or(url)
}

/// Percent-decodes a URL path for display.
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}
