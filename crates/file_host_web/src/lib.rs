//! Browser (`wasm32`) adapters for the [`file_host`] contracts.
//!
//! Everything here compiles on native targets too: browser-only calls sit behind
//! `cfg(target_arch = "wasm32")` with inert fallbacks so host-side tests can run.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod agent;
pub mod dialogs;
pub mod http;
pub mod page;
pub mod socket;
pub mod storage;

use std::rc::Rc;

use file_host::{BackendEndpoint, ConfigStore, FileApi};

pub use agent::{AgentClient, AgentClientError};
pub use http::HttpFileApi;
pub use page::{page_origin, random_user_id, read_selected_files};
pub use socket::{ChangeFeed, ChangeFeedHandlers};
pub use storage::local_storage::WebKeyValueStore;

/// Builds the browser file API for a resolved endpoint, anchored on the page origin.
pub fn file_api(endpoint: &BackendEndpoint) -> Rc<dyn FileApi> {
    Rc::new(HttpFileApi::new(endpoint.anchored(&page_origin())))
}

/// Settings store backed by `localStorage` with random UUID user ids.
pub fn config_store() -> ConfigStore<WebKeyValueStore> {
    ConfigStore::new(WebKeyValueStore, random_user_id)
}
