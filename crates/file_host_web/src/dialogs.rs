//! Blocking browser dialogs and navigation helpers.

/// Shows a blocking `confirm` dialog. Off-browser this always declines.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        false
    }
}

/// Shows a blocking `alert` dialog.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Opens `url` in a new browsing context (used for downloads).
///
/// # Errors
///
/// Returns an error when the browser blocks the window.
pub fn open_in_new_tab(url: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        window
            .open_with_url_and_target(url, "_blank")
            .map_err(|e| format!("window.open failed: {e:?}"))?
            .map(|_| ())
            .ok_or_else(|| "popup blocked".to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = url;
        Err("no browser window on this target".to_string())
    }
}
