//! Wire models returned by the workspace file API.

use serde::{Deserialize, Serialize};

/// Cache namespace used for directory listing keys.
pub const LISTING_CACHE_NAMESPACE: &str = "file-browser";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of a directory entry.
pub enum FileSystemItemKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One entry of a directory listing.
pub struct FileSystemItem {
    /// Base name of the entry.
    pub name: String,
    /// Path relative to the workspace root. Unique within a listing.
    pub path: String,
    /// File or directory kind.
    #[serde(rename = "type")]
    pub kind: FileSystemItemKind,
    /// Size in bytes. Directories report `0`.
    #[serde(default)]
    pub size: u64,
    /// Last-modified time in unix seconds.
    #[serde(default)]
    pub modified: f64,
    /// Extension reported by the backend (files only).
    #[serde(default)]
    pub extension: Option<String>,
}

impl FileSystemItem {
    /// Returns `true` for directory entries.
    pub fn is_directory(&self) -> bool {
        self.kind == FileSystemItemKind::Directory
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Snapshot of a directory's immediate children.
pub struct DirectoryListing {
    /// Backend success flag.
    pub success: bool,
    /// Child entries, directories first.
    pub items: Vec<FileSystemItem>,
    /// Normalized path that was listed (`.` for the root).
    pub current_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Text content of a single file.
pub struct FileContent {
    /// Backend success flag.
    pub success: bool,
    /// UTF-8 text content.
    pub content: String,
    /// Path relative to the workspace root.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Last-modified time in unix seconds.
    pub modified: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of an update or delete call.
pub struct FileMutationResult {
    /// Backend success flag.
    pub success: bool,
    /// Human-readable backend message.
    #[serde(default)]
    pub message: String,
    /// Affected path relative to the workspace root.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of a multipart upload.
pub struct UploadResult {
    /// Backend success flag.
    pub success: bool,
    /// Human-readable backend message.
    #[serde(default)]
    pub message: String,
    /// Stored paths relative to the workspace root.
    #[serde(default)]
    pub uploaded_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Identity reported by `GET /api/user/me`.
pub struct UserInfo {
    /// Backend-issued user identifier.
    pub user_id: String,
    /// Authenticated e-mail when the proxy provides one.
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// File selected for upload, already read into memory.
pub struct UploadFile {
    /// Original file name. Only the base name is honored by the backend.
    pub name: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

/// Builds the cache key for a directory listing.
pub fn listing_cache_key(path: &str) -> String {
    format!("{LISTING_CACHE_NAMESPACE}:{path}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn listing_decodes_backend_payload() {
        let payload = json!({
            "success": true,
            "current_path": ".",
            "items": [
                {
                    "name": "docs",
                    "path": "docs",
                    "type": "directory",
                    "size": 0,
                    "modified": 1_700_000_000.5,
                    "extension": null
                },
                {
                    "name": "notes.md",
                    "path": "notes.md",
                    "type": "file",
                    "size": 42,
                    "modified": 1_700_000_100.0,
                    "extension": "md"
                }
            ]
        });

        let listing: DirectoryListing = serde_json::from_value(payload).expect("decode listing");
        assert_eq!(listing.items.len(), 2);
        assert!(listing.items[0].is_directory());
        assert_eq!(listing.items[1].kind, FileSystemItemKind::File);
        assert_eq!(listing.items[1].extension.as_deref(), Some("md"));
        assert_eq!(listing.current_path, ".");
    }

    #[test]
    fn item_kind_serializes_as_type_field() {
        let item = FileSystemItem {
            name: "a.txt".to_string(),
            path: "a.txt".to_string(),
            kind: FileSystemItemKind::File,
            size: 3,
            modified: 0.0,
            extension: Some("txt".to_string()),
        };
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["type"], json!("file"));
    }

    #[test]
    fn mutation_result_tolerates_missing_fields() {
        let result: FileMutationResult =
            serde_json::from_str(r#"{"success":true}"#).expect("decode");
        assert!(result.success);
        assert!(result.message.is_empty());
    }

    #[test]
    fn listing_cache_key_is_namespaced() {
        assert_eq!(listing_cache_key(""), "file-browser:");
        assert_eq!(listing_cache_key("a/b"), "file-browser:a/b");
    }
}
