//! Connection settings for the external agent deployment API.

use crate::storage::config::StandaloneConfig;

/// Header carrying the deployment API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Header carrying the client user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything needed to build an agent API client.
pub struct AgentClientConfig {
    /// Deployment base URL.
    pub api_url: String,
    /// API key; empty when the deployment does not require one.
    pub api_key: String,
    /// Client user id.
    pub user_id: String,
}

impl AgentClientConfig {
    /// Builds client settings from the stored record.
    ///
    /// Returns `None` when the record has no deployment URL or user id.
    pub fn from_standalone(config: &StandaloneConfig) -> Option<Self> {
        let api_url = config.deployment_url.trim();
        if api_url.is_empty() {
            return None;
        }
        Some(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: config.langsmith_api_key.clone().unwrap_or_default(),
            user_id: config.user_id()?.to_string(),
        })
    }

    /// Headers attached to every request.
    pub fn default_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            (API_KEY_HEADER, self.api_key.clone()),
            (USER_ID_HEADER, self.user_id.clone()),
        ]
    }

    /// Joins `path` onto the deployment URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}
