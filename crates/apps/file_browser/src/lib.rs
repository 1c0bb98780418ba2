//! Workspace file browser UI: directory listing, breadcrumbs, preview/edit dialog, and live
//! refresh from the backend change feed.

mod browser;
mod dialog;
mod hook;
mod list;
mod services;

pub use browser::{
    download_prompt, file_activation, DownloadReason, FileActivation, FileBrowser, ROOT_LABEL,
    SKELETON_ROWS,
};
pub use dialog::{FileViewDialog, OpenFile};
pub use hook::{use_file_browser, FileBrowserHandle};
pub use list::{delete_prompt, entry_details, FileSystemList};
pub use services::{provide_file_browser_services, use_file_browser_services, FileBrowserServices};
