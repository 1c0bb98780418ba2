//! Workspace file API contract and in-memory adapters.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use thiserror::Error;

use super::types::{
    DirectoryListing, FileContent, FileMutationResult, FileSystemItem, FileSystemItemKind,
    UploadFile, UploadResult, UserInfo,
};

/// Object-safe boxed future used by [`FileApi`] async methods.
pub type FileApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure talking to the workspace file API.
pub enum FileApiError {
    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Backend `detail` text, or the status reason when absent.
        message: String,
    },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The operation is not available on this target.
    #[error("file api unavailable: {0}")]
    Unsupported(String),
}

impl FileApiError {
    /// Returns the HTTP status for [`FileApiError::Http`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Workspace file operations. Paths are workspace-relative and unencoded; adapters are
/// responsible for URL encoding.
pub trait FileApi {
    /// Lists the immediate children of a directory (`""` is the workspace root).
    fn list_dir<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<DirectoryListing, FileApiError>>;

    /// Reads a text file.
    fn read_file<'a>(&'a self, path: &'a str)
        -> FileApiFuture<'a, Result<FileContent, FileApiError>>;

    /// Replaces a file's text content, creating the file when missing.
    fn update_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>>;

    /// Deletes a file, or a directory recursively.
    fn delete_path<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>>;

    /// Uploads files into a directory.
    fn upload_files<'a>(
        &'a self,
        dir: &'a str,
        files: Vec<UploadFile>,
    ) -> FileApiFuture<'a, Result<UploadResult, FileApiError>>;

    /// Returns the identity the backend associates with this client.
    fn current_user<'a>(&'a self) -> FileApiFuture<'a, Result<UserInfo, FileApiError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// File API that rejects every call; used on targets without a backend.
pub struct NoopFileApi;

impl NoopFileApi {
    fn unsupported<T>(op: &str) -> Result<T, FileApiError> {
        Err(FileApiError::Unsupported(op.to_string()))
    }
}

impl FileApi for NoopFileApi {
    fn list_dir<'a>(
        &'a self,
        _path: &'a str,
    ) -> FileApiFuture<'a, Result<DirectoryListing, FileApiError>> {
        Box::pin(async { Self::unsupported("list_dir") })
    }

    fn read_file<'a>(
        &'a self,
        _path: &'a str,
    ) -> FileApiFuture<'a, Result<FileContent, FileApiError>> {
        Box::pin(async { Self::unsupported("read_file") })
    }

    fn update_file<'a>(
        &'a self,
        _path: &'a str,
        _content: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>> {
        Box::pin(async { Self::unsupported("update_file") })
    }

    fn delete_path<'a>(
        &'a self,
        _path: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>> {
        Box::pin(async { Self::unsupported("delete_path") })
    }

    fn upload_files<'a>(
        &'a self,
        _dir: &'a str,
        _files: Vec<UploadFile>,
    ) -> FileApiFuture<'a, Result<UploadResult, FileApiError>> {
        Box::pin(async { Self::unsupported("upload_files") })
    }

    fn current_user<'a>(&'a self) -> FileApiFuture<'a, Result<UserInfo, FileApiError>> {
        Box::pin(async { Self::unsupported("current_user") })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MemoryNode {
    Directory { modified: f64 },
    File { bytes: Vec<u8>, modified: f64 },
}

#[derive(Debug, Clone, Default)]
/// In-memory workspace keyed by normalized relative path.
pub struct MemoryFileApi {
    nodes: Rc<RefCell<BTreeMap<String, MemoryNode>>>,
    clock: Rc<RefCell<f64>>,
}

fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

fn not_found(detail: &str) -> FileApiError {
    FileApiError::Http {
        status: 404,
        message: detail.to_string(),
    }
}

impl MemoryFileApi {
    /// Sets the modification timestamp (unix seconds) stamped on subsequent writes.
    pub fn set_clock(&self, unix_secs: f64) {
        *self.clock.borrow_mut() = unix_secs;
    }

    /// Creates a directory and any missing parents.
    pub fn insert_dir(&self, path: &str) {
        let path = normalize(path);
        let modified = *self.clock.borrow();
        let mut nodes = self.nodes.borrow_mut();
        let mut prefix = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            nodes
                .entry(prefix.clone())
                .or_insert(MemoryNode::Directory { modified });
        }
    }

    /// Writes a file, creating missing parent directories.
    pub fn insert_file(&self, path: &str, bytes: impl Into<Vec<u8>>) {
        let path = normalize(path);
        self.insert_dir(parent_of(&path));
        let modified = *self.clock.borrow();
        self.nodes.borrow_mut().insert(
            path,
            MemoryNode::File {
                bytes: bytes.into(),
                modified,
            },
        );
    }

    fn is_dir(&self, path: &str) -> bool {
        path.is_empty()
            || matches!(
                self.nodes.borrow().get(path),
                Some(MemoryNode::Directory { .. })
            )
    }

    fn list_sync(&self, path: &str) -> Result<DirectoryListing, FileApiError> {
        let dir = normalize(path);
        if !self.is_dir(&dir) {
            return Err(not_found("Directory not found"));
        }
        let nodes = self.nodes.borrow();
        let mut items: Vec<FileSystemItem> = nodes
            .iter()
            .filter(|(child, _)| parent_of(child) == dir && !child.is_empty())
            .map(|(child, node)| {
                let name = child.rsplit('/').next().unwrap_or(child).to_string();
                match node {
                    MemoryNode::Directory { modified } => FileSystemItem {
                        name,
                        path: child.clone(),
                        kind: FileSystemItemKind::Directory,
                        size: 0,
                        modified: *modified,
                        extension: None,
                    },
                    MemoryNode::File { bytes, modified } => FileSystemItem {
                        extension: name
                            .rsplit_once('.')
                            .map(|(_, ext)| ext.to_string())
                            .filter(|ext| !ext.is_empty()),
                        name,
                        path: child.clone(),
                        kind: FileSystemItemKind::File,
                        size: bytes.len() as u64,
                        modified: *modified,
                    },
                }
            })
            .collect();
        items.sort_by_key(|item| (!item.is_directory(), item.name.to_lowercase()));
        Ok(DirectoryListing {
            success: true,
            items,
            current_path: if dir.is_empty() { ".".to_string() } else { dir },
        })
    }

    fn read_sync(&self, path: &str) -> Result<FileContent, FileApiError> {
        let path = normalize(path);
        let nodes = self.nodes.borrow();
        match nodes.get(&path) {
            Some(MemoryNode::File { bytes, modified }) => {
                let content = String::from_utf8(bytes.clone()).map_err(|_| FileApiError::Http {
                    status: 400,
                    message: "Binary file not supported. Use ?raw=true for binary files"
                        .to_string(),
                })?;
                Ok(FileContent {
                    success: true,
                    content,
                    size: bytes.len() as u64,
                    modified: *modified,
                    path,
                })
            }
            _ => Err(not_found("File not found")),
        }
    }

    fn update_sync(&self, path: &str, content: &str) -> Result<FileMutationResult, FileApiError> {
        let path = normalize(path);
        if !self.is_dir(parent_of(&path)) {
            return Err(not_found("Parent directory not found"));
        }
        self.insert_file(&path, content.as_bytes().to_vec());
        Ok(FileMutationResult {
            success: true,
            message: "File updated successfully".to_string(),
            path,
        })
    }

    fn delete_sync(&self, path: &str) -> Result<FileMutationResult, FileApiError> {
        let path = normalize(path);
        let mut nodes = self.nodes.borrow_mut();
        if path.is_empty() || nodes.remove(&path).is_none() {
            return Err(not_found("File or directory not found"));
        }
        let prefix = format!("{path}/");
        nodes.retain(|key, _| !key.starts_with(&prefix));
        Ok(FileMutationResult {
            success: true,
            message: "File deleted successfully".to_string(),
            path,
        })
    }

    fn upload_sync(&self, dir: &str, files: Vec<UploadFile>) -> Result<UploadResult, FileApiError> {
        let dir = normalize(dir);
        if !self.is_dir(&dir) {
            return Err(not_found("Target directory not found"));
        }
        let mut uploaded_files = Vec::new();
        for file in files {
            let name = file.name.rsplit(['/', '\\']).next().unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let target = if dir.is_empty() {
                name.to_string()
            } else {
                format!("{dir}/{name}")
            };
            self.insert_file(&target, file.bytes);
            uploaded_files.push(target);
        }
        Ok(UploadResult {
            success: true,
            message: format!("Uploaded {} file(s)", uploaded_files.len()),
            uploaded_files,
        })
    }
}

impl FileApi for MemoryFileApi {
    fn list_dir<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<DirectoryListing, FileApiError>> {
        Box::pin(async move { self.list_sync(path) })
    }

    fn read_file<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<FileContent, FileApiError>> {
        Box::pin(async move { self.read_sync(path) })
    }

    fn update_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>> {
        Box::pin(async move { self.update_sync(path, content) })
    }

    fn delete_path<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>> {
        Box::pin(async move { self.delete_sync(path) })
    }

    fn upload_files<'a>(
        &'a self,
        dir: &'a str,
        files: Vec<UploadFile>,
    ) -> FileApiFuture<'a, Result<UploadResult, FileApiError>> {
        Box::pin(async move { self.upload_sync(dir, files) })
    }

    fn current_user<'a>(&'a self) -> FileApiFuture<'a, Result<UserInfo, FileApiError>> {
        Box::pin(async {
            Ok(UserInfo {
                user_id: "local".to_string(),
                email: None,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(listing: &DirectoryListing) -> Vec<&str> {
        listing.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn noop_file_api_reports_unsupported() {
        let api = NoopFileApi;
        let api_obj: &dyn FileApi = &api;
        let err = block_on(api_obj.list_dir("")).expect_err("list should fail");
        assert_eq!(err, FileApiError::Unsupported("list_dir".to_string()));
        assert!(block_on(api_obj.current_user()).is_err());
    }

    #[test]
    fn memory_listing_sorts_directories_first() {
        let api = MemoryFileApi::default();
        api.insert_file("b.txt", "b");
        api.insert_file("A.md", "a");
        api.insert_dir("zeta");
        api.insert_file("docs/readme.md", "hi");
        let api_obj: &dyn FileApi = &api;

        let root = block_on(api_obj.list_dir("")).expect("list root");
        assert_eq!(root.current_path, ".");
        assert_eq!(names(&root), vec!["docs", "zeta", "A.md", "b.txt"]);
        assert_eq!(root.items[2].extension.as_deref(), Some("md"));

        let docs = block_on(api_obj.list_dir("docs")).expect("list docs");
        assert_eq!(docs.current_path, "docs");
        assert_eq!(names(&docs), vec!["readme.md"]);
        assert_eq!(docs.items[0].path, "docs/readme.md");
    }

    #[test]
    fn memory_missing_directory_is_404() {
        let api = MemoryFileApi::default();
        let err = block_on(api.list_dir("missing")).expect_err("missing dir");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn memory_update_read_delete_cycle() {
        let api = MemoryFileApi::default();
        api.set_clock(100.0);
        api.insert_dir("notes");
        block_on(api.update_file("notes/todo.txt", "one")).expect("create");
        let read = block_on(api.read_file("notes/todo.txt")).expect("read");
        assert_eq!(read.content, "one");
        assert_eq!(read.size, 3);
        assert_eq!(read.modified, 100.0);

        block_on(api.update_file("notes/todo.txt", "two")).expect("update");
        assert_eq!(
            block_on(api.read_file("notes/todo.txt")).expect("read").content,
            "two"
        );

        block_on(api.delete_path("notes")).expect("delete dir");
        assert!(block_on(api.read_file("notes/todo.txt")).is_err());
        assert!(block_on(api.list_dir("notes")).is_err());
    }

    #[test]
    fn memory_update_requires_parent() {
        let api = MemoryFileApi::default();
        let err = block_on(api.update_file("nope/a.txt", "x")).expect_err("no parent");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn memory_upload_keeps_base_names_only() {
        let api = MemoryFileApi::default();
        api.insert_dir("in");
        let result = block_on(api.upload_files(
            "in",
            vec![
                UploadFile {
                    name: "../../etc/passwd".to_string(),
                    bytes: b"x".to_vec(),
                },
                UploadFile {
                    name: String::new(),
                    bytes: Vec::new(),
                },
            ],
        ))
        .expect("upload");
        assert_eq!(result.uploaded_files, vec!["in/passwd".to_string()]);
        assert_eq!(result.message, "Uploaded 1 file(s)");
    }

    #[test]
    fn memory_read_rejects_binary() {
        let api = MemoryFileApi::default();
        api.insert_file("img.png", vec![0xff, 0xfe, 0x00]);
        let err = block_on(api.read_file("img.png")).expect_err("binary");
        assert_eq!(err.status(), Some(400));
    }
}
