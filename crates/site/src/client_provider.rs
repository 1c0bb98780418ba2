use std::rc::Rc;

use file_host::AgentClientConfig;
use file_host_web::AgentClient;
use leptos::*;

#[component]
/// Builds an [`AgentClient`] from `config` and makes it available to `children`.
///
/// Children are not rendered when the client cannot be built (for example a header value with
/// control characters); the failure is logged.
pub fn ClientProvider(config: AgentClientConfig, children: Children) -> impl IntoView {
    match AgentClient::new(config) {
        Ok(client) => {
            provide_context(Rc::new(client));
            children().into_view()
        }
        Err(err) => {
            logging::error!("[file-browser] agent client unavailable: {err}");
            View::default()
        }
    }
}

/// Returns the client from the nearest [`ClientProvider`].
///
/// # Panics
///
/// Panics when called outside a [`ClientProvider`].
pub fn use_client() -> Rc<AgentClient> {
    try_use_client().expect("use_client must be used within a ClientProvider")
}

/// Returns the client from the nearest [`ClientProvider`], if any.
pub fn try_use_client() -> Option<Rc<AgentClient>> {
    use_context::<Rc<AgentClient>>()
}
