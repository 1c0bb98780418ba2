use file_host::{
    breadcrumb_segments, breadcrumb_target, preview_kind_for_path, FileSystemItem, PreviewKind,
};
use file_host_web::{dialogs, read_selected_files};
use leptos::*;
use web_sys::{Event, HtmlInputElement};

use crate::dialog::{FileViewDialog, OpenFile};
use crate::hook::{use_file_browser, FileBrowserHandle};
use crate::list::FileSystemList;
use crate::services::use_file_browser_services;

/// Placeholder rows shown while the first listing loads.
pub const SKELETON_ROWS: usize = 5;

/// Label of the root breadcrumb.
pub const ROOT_LABEL: &str = "workspace";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What activating a file entry does.
pub enum FileActivation {
    /// Fetch the text and open it in the editor.
    LoadText,
    /// Open the dialog straight away with the raw URL.
    ShowByReference(PreviewKind),
    /// Offer a download instead.
    OfferDownload,
}

/// Decides how to open a file entry.
pub fn file_activation(item: &FileSystemItem) -> FileActivation {
    match preview_kind_for_path(&item.path, item.extension.as_deref()) {
        PreviewKind::Text => FileActivation::LoadText,
        PreviewKind::DownloadOnly => FileActivation::OfferDownload,
        kind => FileActivation::ShowByReference(kind),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a download is being offered.
pub enum DownloadReason {
    /// The file type has no preview.
    NotPreviewable,
    /// Reading the file as text failed.
    ReadFailed,
}

/// Confirmation text for a download offer.
pub fn download_prompt(name: &str, reason: DownloadReason) -> String {
    match reason {
        DownloadReason::NotPreviewable => {
            format!("\"{name}\" cannot be previewed. Download it instead?")
        }
        DownloadReason::ReadFailed => {
            format!("\"{name}\" could not be opened as text. Download it instead?")
        }
    }
}

fn offer_download(name: &str, raw_url: &str, reason: DownloadReason) {
    if dialogs::confirm(&download_prompt(name, reason)) {
        if let Err(err) = dialogs::open_in_new_tab(raw_url) {
            logging::warn!("[file-browser] download failed: {err}");
        }
    }
}

/// `true` when `path` is `root` or lies below it.
pub fn is_within(path: &str, root: &str) -> bool {
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[component]
/// Workspace file browser: header, breadcrumbs, listing, and the preview dialog.
pub fn FileBrowser(
    /// Directory shown first; empty for the workspace root.
    #[prop(optional, into)]
    initial_path: String,
    /// Renders a close button in the header when set.
    #[prop(optional, into)]
    on_close: Option<Callback<()>>,
) -> impl IntoView {
    let browser = use_file_browser(initial_path);
    let services = store_value(use_file_browser_services());
    let selected = create_rw_signal::<Option<OpenFile>>(None);
    let opening = create_rw_signal(false);
    let saving = create_rw_signal(false);
    let uploading = create_rw_signal(false);

    let raw_url = move |path: &str| services.with_value(|s| s.raw_file_url(path));

    let on_directory_click =
        Callback::new(move |item: FileSystemItem| browser.navigate_to(item.path));

    let on_file_click = Callback::new(move |item: FileSystemItem| {
        let url = raw_url(&item.path);
        match file_activation(&item) {
            FileActivation::OfferDownload => {
                offer_download(&item.name, &url, DownloadReason::NotPreviewable)
            }
            FileActivation::ShowByReference(kind) => selected.set(Some(OpenFile {
                path: item.path,
                kind,
                content: None,
                raw_url: url,
            })),
            FileActivation::LoadText => {
                opening.set(true);
                spawn_local(async move {
                    match browser.read_file(&item.path).await {
                        Ok(file) => selected.set(Some(OpenFile {
                            path: item.path,
                            kind: PreviewKind::Text,
                            content: Some(file.content),
                            raw_url: url,
                        })),
                        Err(err) => {
                            logging::warn!("[file-browser] reading {:?} failed: {err}", item.path);
                            offer_download(&item.name, &url, DownloadReason::ReadFailed);
                        }
                    }
                    opening.set(false);
                });
            }
        }
    });

    let on_delete_click = Callback::new(move |item: FileSystemItem| {
        spawn_local(async move {
            match browser.delete_file(&item.path).await {
                Ok(_) => {
                    if selected.with_untracked(|open| {
                        open.as_ref().is_some_and(|open| is_within(&open.path, &item.path))
                    }) {
                        selected.set(None);
                    }
                    browser.refresh_directory();
                }
                Err(err) => {
                    logging::warn!("[file-browser] deleting {:?} failed: {err}", item.path);
                    dialogs::alert(&format!("Could not delete \"{}\": {err}", item.name));
                }
            }
        });
    });

    let on_save = Callback::new(move |(path, content): (String, String)| {
        saving.set(true);
        spawn_local(async move {
            match browser.update_file(&path, &content).await {
                Ok(_) => {
                    selected.update(|open| {
                        if let Some(open) = open.as_mut().filter(|open| open.path == path) {
                            open.content = Some(content);
                        }
                    });
                    browser.refresh_directory();
                }
                Err(err) => {
                    logging::warn!("[file-browser] saving {path:?} failed: {err}");
                    dialogs::alert(&format!("Could not save: {err}"));
                }
            }
            saving.set(false);
        });
    });

    let on_upload = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let dir = browser.upload_dir();
        uploading.set(true);
        spawn_local(async move {
            upload_selected(browser, &input, &dir).await;
            input.set_value("");
            uploading.set(false);
        });
    };

    view! {
        <div class="app-shell file-browser">
            <header class="app-toolbar file-browser-header">
                <span class="file-browser-title">"Files"</span>
                <span
                    class=move || if browser.ws_connected().get() { "file-browser-live online" } else { "file-browser-live" }
                    title="Live updates"
                >
                    {move || if browser.ws_connected().get() { "Live" } else { "Offline" }}
                </span>
                <label class="file-browser-upload" title="Upload files">
                    {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                    <input
                        type="file"
                        multiple
                        hidden
                        prop:disabled=move || uploading.get()
                        on:change=on_upload
                    />
                </label>
                <button
                    type="button"
                    title="Refresh"
                    disabled=move || browser.is_validating().get()
                    on:click=move |_| browser.refresh_directory()
                >
                    "Refresh"
                </button>
                {on_close.map(|close| view! {
                    <button type="button" title="Close" on:click=move |_| close.call(())>"Close"</button>
                })}
            </header>

            <Breadcrumbs browser=browser/>

            <div class="file-browser-body">
                {move || {
                    if let Some(err) = browser.error().get() {
                        view! {
                            <div class="file-browser-error" role="alert">
                                <p>{format!("Failed to load directory: {err}")}</p>
                                <button type="button" on:click=move |_| browser.refresh_directory()>"Retry"</button>
                            </div>
                        }
                        .into_view()
                    } else if browser.is_loading().get() {
                        view! {
                            <ul class="file-list loading" aria-busy="true">
                                {(0..SKELETON_ROWS)
                                    .map(|_| view! { <li class="file-row skeleton"></li> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view()
                    } else {
                        view! {
                            <FileSystemList
                                items=browser.items()
                                on_file_click=on_file_click
                                on_directory_click=on_directory_click
                                on_delete_click=on_delete_click
                            />
                        }
                        .into_view()
                    }
                }}
            </div>

            <div class="app-statusbar">
                <span>{move || browser.items().with(|items| format!("{} item(s)", items.len()))}</span>
                <span>{move || if opening.get() { "Opening..." } else if browser.is_validating().get() { "Refreshing..." } else { "Ready" }}</span>
            </div>

            {move || selected.get().map(|file| view! {
                <FileViewDialog
                    file=file
                    on_save=on_save
                    on_close=move |_| selected.set(None)
                    saving=saving
                />
            })}
        </div>
    }
}

async fn upload_selected(browser: FileBrowserHandle, input: &HtmlInputElement, dir: &str) {
    let files = match read_selected_files(input).await {
        Ok(files) => files,
        Err(err) => {
            logging::warn!("[file-browser] reading selected files failed: {err}");
            dialogs::alert(&format!("Could not read the selected files: {err}"));
            return;
        }
    };
    if files.is_empty() {
        return;
    }
    match browser.upload_files(dir, files).await {
        Ok(result) => {
            logging::log!(
                "[file-browser] uploaded {} file(s) to {dir:?}",
                result.uploaded_files.len()
            );
            browser.refresh_directory();
        }
        Err(err) => {
            logging::warn!("[file-browser] upload to {dir:?} failed: {err}");
            dialogs::alert(&format!("Upload failed: {err}"));
        }
    }
}

#[component]
fn Breadcrumbs(browser: FileBrowserHandle) -> impl IntoView {
    let segments = Signal::derive(move || breadcrumb_segments(&browser.current_path().get()));
    let at_root = browser.at_root();

    view! {
        <nav class="file-browser-breadcrumbs" aria-label="Breadcrumb">
            <button
                type="button"
                class=move || if at_root.get() { "crumb current" } else { "crumb" }
                on:click=move |_| browser.navigate_to(breadcrumb_target(&[], None))
            >
                {ROOT_LABEL}
            </button>
            <For
                each={move || segments.get().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(idx, segment)| (*idx, segment.clone())
                children=move |(idx, segment)| {
                    let is_last = move || segments.with(|segments| idx + 1 == segments.len());
                    view! {
                        <span class="crumb-separator" aria-hidden="true">"/"</span>
                        <button
                            type="button"
                            class=move || if is_last() { "crumb current" } else { "crumb" }
                            on:click=move |_| {
                                let target = segments.with_untracked(|segments| breadcrumb_target(segments, Some(idx)));
                                browser.navigate_to(target);
                            }
                        >
                            {segment}
                        </button>
                    }
                }
            />
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use file_host::FileSystemItemKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn file(path: &str, extension: Option<&str>) -> FileSystemItem {
        FileSystemItem {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            kind: FileSystemItemKind::File,
            size: 10,
            modified: 0.0,
            extension: extension.map(str::to_string),
        }
    }

    #[test]
    fn activation_follows_preview_kind() {
        assert_eq!(file_activation(&file("src/main.rs", Some("rs"))), FileActivation::LoadText);
        assert_eq!(
            file_activation(&file("img/logo.PNG", None)),
            FileActivation::ShowByReference(PreviewKind::Image)
        );
        assert_eq!(
            file_activation(&file("docs/report.pdf", Some("pdf"))),
            FileActivation::ShowByReference(PreviewKind::Pdf)
        );
        assert_eq!(file_activation(&file("Makefile", None)), FileActivation::LoadText);
        assert_eq!(
            file_activation(&file("dist/app.zip", Some("zip"))),
            FileActivation::OfferDownload
        );
    }

    #[test]
    fn deleted_directory_covers_nested_paths_only() {
        assert!(is_within("src/lib.rs", "src"));
        assert!(is_within("src", "src"));
        assert!(!is_within("srcs/lib.rs", "src"));
    }

    #[test]
    fn download_prompts_name_the_file() {
        assert_eq!(
            download_prompt("a.zip", DownloadReason::NotPreviewable),
            "\"a.zip\" cannot be previewed. Download it instead?"
        );
        assert!(download_prompt("b.txt", DownloadReason::ReadFailed).contains("could not be opened"));
    }
}
