use file_browser_app::{provide_file_browser_services, FileBrowser, FileBrowserServices};
use file_host::{decode_path_segments, AgentClientConfig, BackendEndpoint};
use file_host_web::{config_store, file_api, page_origin};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::client_provider::{use_client, ClientProvider};
use crate::session::{adopt_user_id, fetch_user_id};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let endpoint = BackendEndpoint::from_build_env();
    logging::log!(
        "[file-browser] backend: {}",
        if endpoint.is_relative() { "same origin" } else { endpoint.base_url() }
    );
    let api = file_api(&endpoint);
    provide_file_browser_services(FileBrowserServices {
        api: api.clone(),
        endpoint,
        page_origin: page_origin(),
    });

    let stored = config_store()
        .get_config(|err| logging::warn!("[file-browser] stored settings ignored: {err}"));
    let agent = create_rw_signal(stored.as_ref().and_then(AgentClientConfig::from_standalone));

    spawn_local(async move {
        let Some(user_id) = fetch_user_id(api.as_ref()).await else {
            return;
        };
        let Some(mut config) = stored else {
            return;
        };
        if adopt_user_id(&mut config, &user_id) {
            config_store().save_config(&config, |err| {
                logging::warn!("[file-browser] saving settings failed: {err}")
            });
            agent.set(AgentClientConfig::from_standalone(&config));
        }
    });

    view! {
        <Title text="Workspace Files" />
        <Meta name="description" content="Browse, preview, and edit files in the agent workspace." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=WorkspaceEntry />
                    <Route path="/files/*path" view=WorkspacePathEntry />
                </Routes>
                {move || agent.get().map(|config| view! {
                    <ClientProvider config=config>
                        <AgentStatus />
                    </ClientProvider>
                })}
            </main>
        </Router>
    }
}

#[component]
pub fn WorkspaceEntry() -> impl IntoView {
    view! { <FileBrowser /> }
}

#[component]
fn WorkspacePathEntry() -> impl IntoView {
    let params = use_params_map();
    let initial_path = params.with_untracked(|map| {
        map.get("path")
            .map(|raw| {
                decode_path_segments(raw).unwrap_or_else(|err| {
                    logging::warn!("[file-browser] ignoring undecodable path {raw:?}: {err}");
                    String::new()
                })
            })
            .unwrap_or_default()
    });

    view! { <FileBrowser initial_path=initial_path /> }
}

#[component]
fn AgentStatus() -> impl IntoView {
    let client = use_client();
    let config = client.config();
    view! {
        <footer class="app-statusbar site-agent-status">
            <span>{format!("Agent: {}", config.api_url)}</span>
            <span>{format!("User: {}", config.user_id)}</span>
        </footer>
    }
}
