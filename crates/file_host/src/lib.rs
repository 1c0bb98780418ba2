//! Host-neutral models and logic for the workspace file browser.
//!
//! This crate holds everything that does not need a browser: wire models, path and preview
//! helpers, display formatting, listing state, the change-feed message decoder, the settings
//! record, and endpoint resolution. Browser adapters live in `file_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod agent;
pub mod endpoint;
pub mod fs;
pub mod storage;
pub mod time;

pub use agent::{AgentClientConfig, API_KEY_HEADER, USER_ID_HEADER};
pub use endpoint::{resolve_backend_url, BackendEndpoint};
pub use fs::events::{
    parse_server_message, FileChangeEvent, FileChangeKind, ServerMessage, ServerMessageError,
    KEEPALIVE_INTERVAL, KEEPALIVE_PING, KEEPALIVE_PONG,
};
pub use fs::format::{format_file_size, format_modified, modified_bucket, ModifiedBucket};
pub use fs::listing::{ApplyOutcome, FetchTicket, ListingSync};
pub use fs::path::{
    breadcrumb_segments, breadcrumb_target, decode_path_segments, encode_path_segments,
    file_name, is_root_path,
};
pub use fs::preview::{
    get_file_extension, is_previewable_file, preview_kind, preview_kind_for_path, PreviewKind,
};
pub use fs::service::{FileApi, FileApiError, FileApiFuture, MemoryFileApi, NoopFileApi};
pub use fs::types::{
    listing_cache_key, DirectoryListing, FileContent, FileMutationResult, FileSystemItem,
    FileSystemItemKind, UploadFile, UploadResult, UserInfo, LISTING_CACHE_NAMESPACE,
};
pub use storage::config::{ConfigError, ConfigStore, StandaloneConfig, CONFIG_KEY};
pub use storage::kv::{KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore};
pub use time::{local_utc_offset_minutes, unix_time_ms_now};
