//! Injected services for the file browser.

use std::rc::Rc;

use file_host::{BackendEndpoint, FileApi};
use leptos::*;

#[derive(Clone)]
/// Backend access handed to the browser by the entry layer.
pub struct FileBrowserServices {
    /// File API implementation.
    pub api: Rc<dyn FileApi>,
    /// Resolved backend endpoint, used for raw download URLs.
    pub endpoint: BackendEndpoint,
    /// Page origin, used to anchor same-origin WebSocket URLs.
    pub page_origin: String,
}

impl FileBrowserServices {
    /// Change-feed WebSocket URL.
    pub fn websocket_url(&self) -> String {
        self.endpoint.websocket_url(&self.page_origin)
    }

    /// Raw-bytes URL for `path`.
    pub fn raw_file_url(&self, path: &str) -> String {
        self.endpoint.raw_file_url(path)
    }
}

/// Makes `services` available to descendant file-browser components.
pub fn provide_file_browser_services(services: FileBrowserServices) {
    provide_context(services);
}

/// Returns the injected [`FileBrowserServices`].
///
/// # Panics
///
/// Panics if called outside a tree where [`provide_file_browser_services`] ran.
pub fn use_file_browser_services() -> FileBrowserServices {
    use_context::<FileBrowserServices>().expect("FileBrowserServices not provided")
}
