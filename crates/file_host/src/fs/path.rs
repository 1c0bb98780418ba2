//! Workspace-relative path helpers: URL segment encoding and breadcrumb derivation.

use std::string::FromUtf8Error;

/// Percent-encodes each `/`-separated segment of `path` individually.
///
/// Separators are kept verbatim and empty segments are preserved, so `a//b` stays `a//b`.
pub fn encode_path_segments(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reverses [`encode_path_segments`].
///
/// # Errors
///
/// Returns an error when a decoded segment is not valid UTF-8.
pub fn decode_path_segments(encoded: &str) -> Result<String, FromUtf8Error> {
    let segments = encoded
        .split('/')
        .map(|segment| urlencoding::decode(segment).map(|s| s.into_owned()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(segments.join("/"))
}

/// Returns `true` when `path` names the workspace root (`""` or `.`).
pub fn is_root_path(path: &str) -> bool {
    path.is_empty() || path == "."
}

/// Splits a listing path into non-empty breadcrumb segments.
pub fn breadcrumb_segments(path: &str) -> Vec<String> {
    if is_root_path(path) {
        return Vec::new();
    }
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Path reached by activating breadcrumb `index`; `None` targets the workspace root.
pub fn breadcrumb_target(segments: &[String], index: Option<usize>) -> String {
    match index {
        None => String::new(),
        Some(idx) => segments
            .iter()
            .take(idx.saturating_add(1))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/"),
    }
}

/// Returns the last path segment, or the whole input when it has no separator.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn segment_encoding_keeps_separators() {
        let encoded = encode_path_segments("a b/c#d");
        assert_eq!(encoded, "a%20b/c%23d");

        let decoded = decode_path_segments(&encoded).expect("decode");
        assert_eq!(decoded, "a b/c#d");
        assert_eq!(decoded.split('/').collect::<Vec<_>>(), vec!["a b", "c#d"]);
    }

    #[test]
    fn segment_encoding_preserves_empty_segments_and_unicode() {
        assert_eq!(encode_path_segments("a//b"), "a//b");
        assert_eq!(encode_path_segments(""), "");
        let encoded = encode_path_segments("資料/報告 1.md");
        assert!(!encoded.contains(' '));
        assert_eq!(encoded.matches('/').count(), 1);
        assert_eq!(
            decode_path_segments(&encoded).expect("decode"),
            "資料/報告 1.md"
        );
    }

    #[test]
    fn breadcrumbs_split_and_target() {
        let segments = breadcrumb_segments("a/b/c");
        assert_eq!(segments, vec!["a", "b", "c"]);
        assert_eq!(breadcrumb_target(&segments, Some(1)), "a/b");
        assert_eq!(breadcrumb_target(&segments, Some(2)), "a/b/c");
        assert_eq!(breadcrumb_target(&segments, None), "");
    }

    #[test]
    fn root_paths_have_no_breadcrumbs() {
        assert!(breadcrumb_segments("").is_empty());
        assert!(breadcrumb_segments(".").is_empty());
        assert_eq!(breadcrumb_segments("/docs//notes/"), vec!["docs", "notes"]);
    }

    #[test]
    fn file_name_takes_last_segment() {
        assert_eq!(file_name("docs/readme.md"), "readme.md");
        assert_eq!(file_name("readme.md"), "readme.md");
    }
}
