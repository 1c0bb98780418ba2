mod client_provider;
mod session;
mod web_app;

pub use client_provider::{try_use_client, use_client, ClientProvider};
pub use session::{adopt_user_id, fetch_user_id};
pub use web_app::{SiteApp, WorkspaceEntry};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
