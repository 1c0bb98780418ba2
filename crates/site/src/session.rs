//! Client identity: the backend-issued user id wins over the locally generated one.

use file_host::{FileApi, StandaloneConfig};
use leptos::logging;

/// Asks the backend who the current user is.
///
/// Returns `None` when the request fails or the backend reports an empty id.
pub async fn fetch_user_id(api: &dyn FileApi) -> Option<String> {
    match api.current_user().await {
        Ok(user) if !user.user_id.is_empty() => Some(user.user_id),
        Ok(_) => {
            logging::warn!("[file-browser] backend returned an empty user id");
            None
        }
        Err(err) => {
            logging::warn!("[file-browser] fetching user id failed: {err}");
            None
        }
    }
}

/// Stores `user_id` in `config`. Returns `true` when the record changed.
pub fn adopt_user_id(config: &mut StandaloneConfig, user_id: &str) -> bool {
    if user_id.is_empty() || config.user_id() == Some(user_id) {
        return false;
    }
    config.user_id = Some(user_id.to_string());
    true
}

#[cfg(test)]
mod tests {
    use file_host::{MemoryFileApi, NoopFileApi};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn stored(user_id: Option<&str>) -> StandaloneConfig {
        StandaloneConfig {
            deployment_url: "http://127.0.0.1:2024".to_string(),
            assistant_id: "agent".to_string(),
            langsmith_api_key: None,
            user_id: user_id.map(str::to_string),
        }
    }

    #[test]
    fn backend_id_is_returned() {
        let api = MemoryFileApi::default();
        assert_eq!(block_on(fetch_user_id(&api)), Some("local".to_string()));
    }

    #[test]
    fn failed_lookup_is_none() {
        assert_eq!(block_on(fetch_user_id(&NoopFileApi)), None);
    }

    #[test]
    fn backend_id_replaces_random_id() {
        let mut config = stored(Some("3f1c-random"));
        assert!(adopt_user_id(&mut config, "alice"));
        assert_eq!(config.user_id(), Some("alice"));
        assert!(!adopt_user_id(&mut config, "alice"));
        assert!(!adopt_user_id(&mut config, ""));
        assert_eq!(config.user_id(), Some("alice"));
    }
}
