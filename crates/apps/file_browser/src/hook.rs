//! Reactive directory-browser state: cached listings, file operations, and the live change feed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use file_host::{
    ApplyOutcome, FetchTicket, FileApi, FileApiError, FileContent, FileMutationResult,
    FileSystemItem, ListingSync, UploadFile, UploadResult, KEEPALIVE_INTERVAL,
};
use file_host_web::{ChangeFeed, ChangeFeedHandlers};
use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::*;

use crate::services::{use_file_browser_services, FileBrowserServices};

#[derive(Clone, Copy)]
/// Handle returned by [`use_file_browser`]. Cheap to copy into event handlers.
pub struct FileBrowserHandle {
    sync: RwSignal<ListingSync>,
    ws_connected: RwSignal<bool>,
    services: StoredValue<FileBrowserServices>,
}

impl FileBrowserHandle {
    /// Items of the visible directory.
    pub fn items(self) -> Signal<Vec<FileSystemItem>> {
        let sync = self.sync;
        Signal::derive(move || sync.with(|s| s.items().to_vec()))
    }

    /// Backend-reported path of the visible directory.
    pub fn current_path(self) -> Signal<String> {
        let sync = self.sync;
        Signal::derive(move || sync.with(ListingSync::display_path))
    }

    /// Path to send uploads to; `""` at the workspace root.
    pub fn upload_dir(self) -> String {
        self.sync.with_untracked(|s| {
            if s.at_root() {
                String::new()
            } else {
                s.display_path()
            }
        })
    }

    /// `true` while the first fetch for the visible path is outstanding.
    pub fn is_loading(self) -> Signal<bool> {
        let sync = self.sync;
        Signal::derive(move || sync.with(ListingSync::is_loading))
    }

    /// `true` while any fetch for the visible path is outstanding.
    pub fn is_validating(self) -> Signal<bool> {
        let sync = self.sync;
        Signal::derive(move || sync.with(ListingSync::is_validating))
    }

    /// Error from the latest fetch of the visible path.
    pub fn error(self) -> Signal<Option<FileApiError>> {
        let sync = self.sync;
        Signal::derive(move || sync.with(|s| s.error().cloned()))
    }

    /// `true` when the visible path is the workspace root.
    pub fn at_root(self) -> Signal<bool> {
        let sync = self.sync;
        Signal::derive(move || sync.with(ListingSync::at_root))
    }

    /// `true` while the change feed is open.
    pub fn ws_connected(self) -> Signal<bool> {
        self.ws_connected.into()
    }

    /// Shows `path` and fetches its listing. Cached items stay visible while the fetch runs.
    pub fn navigate_to(self, path: impl Into<String>) {
        let path = path.into();
        if let Some(ticket) = self.sync.try_update(|s| s.navigate(path)) {
            self.fetch(ticket);
        }
    }

    /// Refetches the visible directory.
    pub fn refresh_directory(self) {
        if let Some(ticket) = self.sync.try_update(ListingSync::revalidate) {
            self.fetch(ticket);
        }
    }

    fn api(self) -> Rc<dyn FileApi> {
        self.services.with_value(|services| services.api.clone())
    }

    fn fetch(self, ticket: FetchTicket) {
        let api = self.api();
        let sync = self.sync;
        spawn_local(async move {
            let result = api.list_dir(&ticket.path).await;
            if let Err(err) = &result {
                logging::warn!("[file-browser] listing {:?} failed: {err}", ticket.path);
            }
            if let Some(ApplyOutcome::Stale) = sync.try_update(|s| s.apply(&ticket, result)) {
                logging::log!(
                    "[file-browser] discarded stale listing for {:?} (generation {})",
                    ticket.path,
                    ticket.generation
                );
            }
        });
    }

    /// Reads a text file.
    ///
    /// # Errors
    ///
    /// Propagates the file API error.
    pub async fn read_file(self, path: &str) -> Result<FileContent, FileApiError> {
        self.api().read_file(path).await
    }

    /// Replaces the content of a text file.
    ///
    /// # Errors
    ///
    /// Propagates the file API error.
    pub async fn update_file(
        self,
        path: &str,
        content: &str,
    ) -> Result<FileMutationResult, FileApiError> {
        self.api().update_file(path, content).await
    }

    /// Deletes a file or directory tree.
    ///
    /// # Errors
    ///
    /// Propagates the file API error.
    pub async fn delete_file(self, path: &str) -> Result<FileMutationResult, FileApiError> {
        self.api().delete_path(path).await
    }

    /// Uploads `files` into `dir`.
    ///
    /// # Errors
    ///
    /// Propagates the file API error.
    pub async fn upload_files(
        self,
        dir: &str,
        files: Vec<UploadFile>,
    ) -> Result<UploadResult, FileApiError> {
        self.api().upload_files(dir, files).await
    }

    fn on_frame(self, frame: &str) {
        match self.sync.try_update(|s| s.on_server_frame(frame)) {
            Some(Ok(Some(ticket))) => {
                logging::log!("[file-browser] change reported, refreshing {:?}", ticket.path);
                self.fetch(ticket);
            }
            Some(Ok(None)) | None => {}
            Some(Err(err)) => logging::warn!("[file-browser] ignored change-feed frame: {err}"),
        }
    }
}

/// Creates directory-browser state starting at `initial_path` (`""` is the workspace root).
///
/// Fetches the first listing immediately and keeps the change feed open until the owning
/// component is cleaned up.
pub fn use_file_browser(initial_path: impl Into<String>) -> FileBrowserHandle {
    let services = use_file_browser_services();
    let url = services.websocket_url();
    let handle = FileBrowserHandle {
        sync: create_rw_signal(ListingSync::new(initial_path)),
        ws_connected: create_rw_signal(false),
        services: store_value(services),
    };
    handle.refresh_directory();
    connect_change_feed(handle, url);
    handle
}

fn connect_change_feed(handle: FileBrowserHandle, url: String) {
    let connected = handle.ws_connected;
    let feed: Rc<RefCell<Option<ChangeFeed>>> = Rc::new(RefCell::new(None));
    let ping: Rc<Cell<Option<IntervalHandle>>> = Rc::new(Cell::new(None));
    let was_open = Rc::new(Cell::new(false));

    let handlers = ChangeFeedHandlers {
        on_open: Box::new({
            let feed = feed.clone();
            let ping = ping.clone();
            let was_open = was_open.clone();
            let url = url.clone();
            move || {
                logging::log!("[file-browser] change feed connected: {url}");
                was_open.set(true);
                connected.set(true);
                let feed = feed.clone();
                let timer = set_interval_with_handle(
                    move || {
                        if let Some(feed) = feed.borrow().as_ref() {
                            if let Err(err) = feed.send_ping() {
                                logging::warn!("[file-browser] keep-alive ping failed: {err}");
                            }
                        }
                    },
                    KEEPALIVE_INTERVAL,
                );
                match timer {
                    Ok(timer) => {
                        if let Some(previous) = ping.replace(Some(timer)) {
                            previous.clear();
                        }
                    }
                    Err(err) => {
                        logging::warn!("[file-browser] keep-alive timer failed: {err:?}")
                    }
                }
            }
        }),
        on_message: Box::new(move |frame| handle.on_frame(&frame)),
        on_error: Box::new({
            let was_open = was_open.clone();
            let url = url.clone();
            move || {
                if was_open.get() {
                    logging::error!("[file-browser] change feed error: {url}");
                } else {
                    logging::warn!("[file-browser] change feed unreachable: {url}");
                }
                connected.set(false);
            }
        }),
        on_close: Box::new({
            let ping = ping.clone();
            move |code, reason| {
                logging::log!("[file-browser] change feed closed ({code}) {reason}");
                connected.set(false);
                if let Some(timer) = ping.take() {
                    timer.clear();
                }
            }
        }),
    };

    match ChangeFeed::connect(&url, handlers) {
        Ok(opened) => *feed.borrow_mut() = Some(opened),
        Err(err) => {
            logging::warn!("[file-browser] change feed disabled: {err}");
            connected.set(false);
        }
    }

    on_cleanup(move || {
        if let Some(timer) = ping.take() {
            timer.clear();
        }
        if let Some(feed) = feed.borrow_mut().take() {
            feed.close();
        }
    });
}
