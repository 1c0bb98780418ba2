use file_host::{
    format_file_size, format_modified, local_utc_offset_minutes, unix_time_ms_now, FileSystemItem,
};
use file_host_web::dialogs;
use leptos::*;
use web_sys::MouseEvent;

/// Secondary line under an entry name: size and date for files, date only for directories.
pub fn entry_details(item: &FileSystemItem, now_ms: f64, utc_offset_minutes: i32) -> String {
    let modified = format_modified(item.modified, now_ms, utc_offset_minutes);
    if item.is_directory() {
        modified
    } else {
        format!("{} \u{2022} {modified}", format_file_size(item.size))
    }
}

/// Confirmation text shown before deleting `name`.
pub fn delete_prompt(item: &FileSystemItem) -> String {
    if item.is_directory() {
        format!("Delete folder \"{}\" and everything in it?", item.name)
    } else {
        format!("Delete \"{}\"?", item.name)
    }
}

#[component]
/// Rows for one directory listing.
///
/// Clicks are routed by entry kind. Deletion is offered only when `on_delete_click` is set and
/// always asks for confirmation first.
pub fn FileSystemList(
    #[prop(into)] items: Signal<Vec<FileSystemItem>>,
    #[prop(into)] on_file_click: Callback<FileSystemItem>,
    #[prop(into)] on_directory_click: Callback<FileSystemItem>,
    #[prop(optional, into)] on_delete_click: Option<Callback<FileSystemItem>>,
) -> impl IntoView {
    let now_ms = unix_time_ms_now();
    let utc_offset_minutes = local_utc_offset_minutes();

    view! {
        <Show
            when=move || items.with(|items| !items.is_empty())
            fallback=|| view! {
                <div class="file-list-empty" role="status">
                    <span class="file-list-empty-glyph" aria-hidden="true">"[ ]"</span>
                    <p>"This folder is empty"</p>
                </div>
            }
        >
            <ul class="file-list" role="list">
                <For each=move || items.get() key=|item| item.path.clone() let:item>
                    <FileRow
                        item=item
                        on_file_click=on_file_click
                        on_directory_click=on_directory_click
                        on_delete_click=on_delete_click
                        now_ms=now_ms
                        utc_offset_minutes=utc_offset_minutes
                    />
                </For>
            </ul>
        </Show>
    }
}

#[component]
fn FileRow(
    item: FileSystemItem,
    on_file_click: Callback<FileSystemItem>,
    on_directory_click: Callback<FileSystemItem>,
    on_delete_click: Option<Callback<FileSystemItem>>,
    now_ms: f64,
    utc_offset_minutes: i32,
) -> impl IntoView {
    let is_directory = item.is_directory();
    let details = entry_details(&item, now_ms, utc_offset_minutes);
    let name = item.name.clone();

    let delete_button = on_delete_click.map(|on_delete| {
        let target = item.clone();
        let label = format!("Delete {}", item.name);
        view! {
            <button
                type="button"
                class="file-row-delete"
                title=label.clone()
                aria-label=label
                on:click=move |ev: MouseEvent| {
                    ev.stop_propagation();
                    if dialogs::confirm(&delete_prompt(&target)) {
                        on_delete.call(target.clone());
                    }
                }
            >
                "Delete"
            </button>
        }
    });

    let activate = move |_| {
        if item.is_directory() {
            on_directory_click.call(item.clone());
        } else {
            on_file_click.call(item.clone());
        }
    };

    view! {
        <li class="file-row" data-kind=if is_directory { "directory" } else { "file" }>
            <button type="button" class="file-row-main" on:click=activate>
                <span class="file-row-icon" aria-hidden="true">
                    {if is_directory { "[DIR]" } else { "[FILE]" }}
                </span>
                <span class="file-row-text">
                    <span class="file-row-name">{name}</span>
                    <span class="file-row-details">{details}</span>
                </span>
                {is_directory.then(|| view! { <span class="file-row-chevron" aria-hidden="true">">"</span> })}
            </button>
            {delete_button}
        </li>
    }
}

#[cfg(test)]
mod tests {
    use file_host::FileSystemItemKind;
    use pretty_assertions::assert_eq;

    use super::*;

    const NOW_MS: f64 = 1_710_505_800_000.0;

    fn entry(name: &str, kind: FileSystemItemKind, size: u64, modified: f64) -> FileSystemItem {
        FileSystemItem {
            name: name.to_string(),
            path: name.to_string(),
            kind,
            size,
            modified,
            extension: None,
        }
    }

    #[test]
    fn files_show_size_and_date() {
        let file = entry("notes.md", FileSystemItemKind::File, 1536, NOW_MS / 1000.0 - 86_400.0);
        assert_eq!(entry_details(&file, NOW_MS, 0), "1.5 KB \u{2022} Yesterday");
    }

    #[test]
    fn directories_show_date_only() {
        let dir = entry("src", FileSystemItemKind::Directory, 4096, NOW_MS / 1000.0 - 3.0 * 86_400.0);
        assert_eq!(entry_details(&dir, NOW_MS, 0), "3 days ago");
    }

    #[test]
    fn delete_prompt_warns_about_directory_contents() {
        let dir = entry("build", FileSystemItemKind::Directory, 0, 0.0);
        let file = entry("a.txt", FileSystemItemKind::File, 0, 0.0);
        assert!(delete_prompt(&dir).contains("everything in it"));
        assert_eq!(delete_prompt(&file), "Delete \"a.txt\"?");
    }
}
