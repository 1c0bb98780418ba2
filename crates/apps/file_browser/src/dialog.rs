use file_host::{file_name, PreviewKind};
use file_host_web::dialogs;
use leptos::*;
use web_sys::KeyboardEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
/// File shown in the preview dialog.
pub struct OpenFile {
    /// Path relative to the workspace root.
    pub path: String,
    /// How the file renders.
    pub kind: PreviewKind,
    /// Loaded text for [`PreviewKind::Text`]; `None` for by-reference previews.
    pub content: Option<String>,
    /// Raw-bytes URL used for image/PDF rendering and downloads.
    pub raw_url: String,
}

impl OpenFile {
    /// Base name shown in the dialog title.
    pub fn name(&self) -> &str {
        file_name(&self.path)
    }
}

/// Save button state for the editor.
pub fn can_save(original: &str, draft: &str, saving: bool) -> bool {
    !saving && original != draft
}

#[component]
/// Modal preview for one file: text editor, image, or PDF, with download and close.
pub fn FileViewDialog(
    file: OpenFile,
    /// Called with `(path, new_content)` when the user saves.
    #[prop(into)]
    on_save: Callback<(String, String)>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] saving: Signal<bool>,
) -> impl IntoView {
    let title = file.name().to_string();
    let original = store_value(file.content.clone().unwrap_or_default());
    let draft = create_rw_signal(original.get_value());
    let path = store_value(file.path.clone());
    let raw_url = file.raw_url.clone();
    let saveable = Signal::derive(move || {
        original.with_value(|original| draft.with(|draft| can_save(original, draft, saving.get())))
    });

    let body = match file.kind {
        PreviewKind::Text => view! {
            <textarea
                class="file-view-editor"
                spellcheck="false"
                aria-label=format!("Contents of {title}")
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            ></textarea>
        }
        .into_view(),
        PreviewKind::Image => view! {
            <img class="file-view-image" src=raw_url.clone() alt=title.clone()/>
        }
        .into_view(),
        PreviewKind::Pdf => view! {
            <iframe class="file-view-pdf" src=raw_url.clone() title=title.clone()></iframe>
        }
        .into_view(),
        PreviewKind::DownloadOnly => view! {
            <p class="file-view-empty">"No preview available for this file."</p>
        }
        .into_view(),
    };
    let editable = file.kind == PreviewKind::Text;

    let download = move |_| {
        if let Err(err) = dialogs::open_in_new_tab(&raw_url) {
            logging::warn!("[file-browser] download failed: {err}");
        }
    };

    view! {
        <div
            class="file-view-backdrop"
            on:click=move |_| on_close.call(())
        >
            <div
                class="file-view-dialog"
                role="dialog"
                aria-modal="true"
                aria-label=title.clone()
                tabindex="-1"
                on:click=|ev| ev.stop_propagation()
                on:keydown=move |ev: KeyboardEvent| {
                    if ev.key() == "Escape" {
                        on_close.call(());
                    }
                }
            >
                <header class="file-view-header">
                    <div class="file-view-title">
                        <span class="file-view-name">{title.clone()}</span>
                        <span class="file-view-path">{path.get_value()}</span>
                    </div>
                    <div class="file-view-actions">
                        <Show when=move || editable fallback=|| ()>
                            <button
                                type="button"
                                disabled=move || !saveable.get()
                                on:click=move |_| on_save.call((path.get_value(), draft.get_untracked()))
                            >
                                {move || if saving.get() { "Saving..." } else { "Save" }}
                            </button>
                        </Show>
                        <button type="button" on:click=download>"Download"</button>
                        <button type="button" on:click=move |_| on_close.call(())>"Close"</button>
                    </div>
                </header>
                <div class="file-view-body">{body}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_requires_changes_and_idle_state() {
        assert!(!can_save("a", "a", false));
        assert!(can_save("a", "ab", false));
        assert!(!can_save("a", "ab", true));
    }

    #[test]
    fn name_is_last_path_segment() {
        let file = OpenFile {
            path: "docs/guide/intro.md".to_string(),
            kind: PreviewKind::Text,
            content: Some(String::new()),
            raw_url: "/api/files/docs/guide/intro.md?raw=true".to_string(),
        };
        assert_eq!(file.name(), "intro.md");
    }
}
