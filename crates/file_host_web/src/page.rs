//! Page-level environment: origin, identifiers, and selected upload files.

use file_host::UploadFile;

/// Origin of the current page (`scheme://host[:port]`), or `""` off-browser.
pub fn page_origin() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

/// Generates a random client identifier.
pub fn random_user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Reads every file chosen in an `<input type="file">` into memory.
///
/// # Errors
///
/// Returns an error when a file cannot be read.
pub async fn read_selected_files(
    input: &web_sys::HtmlInputElement,
) -> Result<Vec<UploadFile>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen_futures::JsFuture;

        let Some(list) = input.files() else {
            return Ok(Vec::new());
        };
        let mut files = Vec::with_capacity(list.length() as usize);
        for idx in 0..list.length() {
            let Some(file) = list.get(idx) else {
                continue;
            };
            let buffer = JsFuture::from(file.array_buffer())
                .await
                .map_err(|e| format!("reading `{}` failed: {e:?}", file.name()))?;
            files.push(UploadFile {
                name: file.name(),
                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
            });
        }
        Ok(files)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = input;
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_ids_are_distinct_uuids() {
        let a = random_user_id();
        let b = random_user_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn off_browser_origin_is_empty() {
        assert_eq!(page_origin(), "");
    }
}
