//! Backend base-URL resolution and endpoint construction.
//!
//! Resolution happens once at startup; the resulting [`BackendEndpoint`] is passed to whoever
//! needs it instead of living in a global.

use crate::fs::path::encode_path_segments;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Resolved backend location.
///
/// An empty base means "same origin": API paths are used relative to the page.
pub struct BackendEndpoint {
    base_url: String,
}

/// Picks the backend base URL: `backend_url`, then `file_api_url`, then `""`.
///
/// Blank values count as unset and a trailing `/` is dropped.
pub fn resolve_backend_url(backend_url: Option<&str>, file_api_url: Option<&str>) -> String {
    [backend_url, file_api_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(|value| value.trim_end_matches('/').to_string())
        .unwrap_or_default()
}

impl BackendEndpoint {
    /// Wraps an already-resolved base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolves from explicit configuration values.
    pub fn resolve(backend_url: Option<&str>, file_api_url: Option<&str>) -> Self {
        Self::new(resolve_backend_url(backend_url, file_api_url))
    }

    /// Resolves from `BACKEND_URL` / `FILE_API_URL` as captured at build time.
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("BACKEND_URL"), option_env!("FILE_API_URL"))
    }

    /// Configured base URL (`""` for same-origin).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `true` when requests go to the page origin.
    pub fn is_relative(&self) -> bool {
        self.base_url.is_empty()
    }

    /// Absolute base for clients that cannot issue relative requests.
    ///
    /// Uses `page_origin` when the configured base is relative.
    pub fn absolute_base(&self, page_origin: &str) -> String {
        if self.is_relative() {
            page_origin.trim_end_matches('/').to_string()
        } else {
            self.base_url.clone()
        }
    }

    /// Rebases this endpoint onto `page_origin` when it is relative.
    pub fn anchored(&self, page_origin: &str) -> Self {
        Self::new(self.absolute_base(page_origin))
    }

    /// `GET` directory listing URL.
    pub fn list_url(&self, path: &str) -> String {
        format!(
            "{}/api/files?path={}",
            self.base_url,
            urlencoding::encode(path)
        )
    }

    /// File URL with each path segment encoded.
    pub fn file_url(&self, path: &str) -> String {
        format!("{}/api/files/{}", self.base_url, encode_path_segments(path))
    }

    /// Raw-bytes download URL for a file.
    pub fn raw_file_url(&self, path: &str) -> String {
        format!("{}?raw=true", self.file_url(path))
    }

    /// Multipart upload URL.
    pub fn upload_url(&self) -> String {
        format!("{}/api/files/upload", self.base_url)
    }

    /// Current-user URL.
    pub fn user_url(&self) -> String {
        format!("{}/api/user/me", self.base_url)
    }

    /// Change-feed WebSocket URL, swapping `http`→`ws` and `https`→`wss`.
    pub fn websocket_url(&self, page_origin: &str) -> String {
        let base = self.absolute_base(page_origin);
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base
        };
        format!("{ws_base}/ws")
    }
}
