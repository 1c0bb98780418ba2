//! Standalone agent settings persisted as a single JSON record.

use serde::{Deserialize, Serialize};

use super::kv::KeyValueStore;

/// Storage key of the settings record.
pub const CONFIG_KEY: &str = "deep-agent-config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Connection settings for the agent deployment.
pub struct StandaloneConfig {
    /// Base URL of the agent deployment.
    pub deployment_url: String,
    /// Assistant (graph) identifier.
    pub assistant_id: String,
    /// Optional API key sent as `X-Api-Key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub langsmith_api_key: Option<String>,
    /// Client identifier; assigned once and then stable for this browser profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl StandaloneConfig {
    /// Returns the user id when it is set and non-empty.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Failure reported by [`ConfigStore`] operations.
pub enum ConfigError {
    /// Backing storage failed.
    #[error("config storage failed: {0}")]
    Storage(String),
    /// The stored record is not valid JSON for [`StandaloneConfig`].
    #[error("config record is invalid: {0}")]
    Invalid(String),
}

/// Settings accessor over a [`KeyValueStore`] with an injected id generator.
pub struct ConfigStore<S> {
    store: S,
    new_user_id: Box<dyn Fn() -> String>,
}

impl<S: KeyValueStore> ConfigStore<S> {
    /// Creates a store that assigns missing user ids with `new_user_id`.
    pub fn new(store: S, new_user_id: impl Fn() -> String + 'static) -> Self {
        Self {
            store,
            new_user_id: Box::new(new_user_id),
        }
    }

    /// Loads the settings record, assigning and persisting a user id when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error when storage fails, the stored record cannot be decoded, or a newly
    /// assigned id cannot be persisted. [`Self::get_config`] keeps the record in that last case.
    pub fn load(&self) -> Result<Option<StandaloneConfig>, ConfigError> {
        let Some(mut config) = self.read()? else {
            return Ok(None);
        };
        if self.assign_missing_user_id(&mut config) {
            self.save(&config)?;
        }
        Ok(Some(config))
    }

    fn read(&self) -> Result<Option<StandaloneConfig>, ConfigError> {
        let Some(raw) = self.store.load_raw(CONFIG_KEY).map_err(ConfigError::Storage)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn assign_missing_user_id(&self, config: &mut StandaloneConfig) -> bool {
        if config.user_id().is_some() {
            return false;
        }
        config.user_id = Some((self.new_user_id)());
        true
    }

    /// Writes the whole settings record.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or storage fails.
    pub fn save(&self, config: &StandaloneConfig) -> Result<(), ConfigError> {
        let raw =
            serde_json::to_string(config).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.store
            .save_raw(CONFIG_KEY, &raw)
            .map_err(ConfigError::Storage)
    }

    /// Removes the settings record.
    ///
    /// # Errors
    ///
    /// Returns an error when storage fails.
    pub fn clear(&self) -> Result<(), ConfigError> {
        self.store
            .remove_raw(CONFIG_KEY)
            .map_err(ConfigError::Storage)
    }

    /// [`Self::load`] that degrades instead of failing, handing the error to `on_error`.
    ///
    /// An unreadable record yields `None`. When only persisting a newly assigned user id fails,
    /// the record is still returned with that id.
    pub fn get_config(&self, on_error: impl FnOnce(&ConfigError)) -> Option<StandaloneConfig> {
        let mut config = match self.read() {
            Ok(Some(config)) => config,
            Ok(None) => return None,
            Err(err) => {
                on_error(&err);
                return None;
            }
        };
        if self.assign_missing_user_id(&mut config) {
            self.save_config(&config, on_error);
        }
        Some(config)
    }

    /// [`Self::save`] that degrades to a no-op, handing the error to `on_error`.
    pub fn save_config(&self, config: &StandaloneConfig, on_error: impl FnOnce(&ConfigError)) {
        if let Err(err) = self.save(config) {
            on_error(&err);
        }
    }

    /// [`Self::clear`] that degrades to a no-op, handing the error to `on_error`.
    pub fn clear_config(&self, on_error: impl FnOnce(&ConfigError)) {
        if let Err(err) = self.clear() {
            on_error(&err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::kv::MemoryKeyValueStore;

    fn counting_store(store: MemoryKeyValueStore) -> (ConfigStore<MemoryKeyValueStore>, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let config_store = ConfigStore::new(store, move || {
            counter.set(counter.get() + 1);
            format!("user-{}", counter.get())
        });
        (config_store, calls)
    }

    fn sample() -> StandaloneConfig {
        StandaloneConfig {
            deployment_url: "http://127.0.0.1:2024".to_string(),
            assistant_id: "agent".to_string(),
            langsmith_api_key: None,
            user_id: None,
        }
    }

    #[test]
    fn missing_record_is_none() {
        let (store, calls) = counting_store(MemoryKeyValueStore::default());
        assert_eq!(store.load(), Ok(None));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn user_id_is_backfilled_once_and_stable() {
        let kv = MemoryKeyValueStore::default();
        let (store, calls) = counting_store(kv.clone());
        store.save(&sample()).expect("save");

        let first = store.load().expect("load").expect("config");
        let second = store.load().expect("load").expect("config");
        assert_eq!(first.user_id(), Some("user-1"));
        assert_eq!(second.user_id(), Some("user-1"));
        assert_eq!(calls.get(), 1);

        let raw = kv.load_raw(CONFIG_KEY).expect("raw").expect("present");
        assert!(raw.contains("\"userId\":\"user-1\""));
        assert!(raw.contains("\"deploymentUrl\""));
    }

    #[test]
    fn empty_user_id_counts_as_missing() {
        let (store, calls) = counting_store(MemoryKeyValueStore::default());
        let mut config = sample();
        config.user_id = Some(String::new());
        store.save(&config).expect("save");
        assert_eq!(
            store.load().expect("load").and_then(|c| c.user_id),
            Some("user-1".to_string())
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn invalid_record_degrades_to_none() {
        let kv = MemoryKeyValueStore::default();
        kv.save_raw(CONFIG_KEY, "{not json").expect("seed");
        let (store, _) = counting_store(kv);
        let mut seen = None;
        assert_eq!(store.get_config(|err| seen = Some(err.clone())), None);
        assert!(matches!(seen, Some(ConfigError::Invalid(_))));
    }

    #[derive(Clone)]
    struct ReadOnlyStore(MemoryKeyValueStore);

    impl KeyValueStore for ReadOnlyStore {
        fn load_raw(&self, key: &str) -> Result<Option<String>, String> {
            self.0.load_raw(key)
        }

        fn save_raw(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("QuotaExceededError".to_string())
        }

        fn remove_raw(&self, key: &str) -> Result<(), String> {
            self.0.remove_raw(key)
        }
    }

    #[test]
    fn failed_backfill_write_keeps_record() {
        let kv = MemoryKeyValueStore::default();
        kv.save_raw(CONFIG_KEY, r#"{"deploymentUrl":"http://d","assistantId":"a"}"#)
            .expect("seed");
        let store = ConfigStore::new(ReadOnlyStore(kv), || "user-fresh".to_string());

        let mut seen = None;
        let config = store
            .get_config(|err| seen = Some(err.clone()))
            .expect("record survives");
        assert_eq!(config.deployment_url, "http://d");
        assert_eq!(config.user_id(), Some("user-fresh"));
        assert_eq!(
            seen,
            Some(ConfigError::Storage("QuotaExceededError".to_string()))
        );
        assert!(matches!(store.load(), Err(ConfigError::Storage(_))));
    }

    #[test]
    fn clear_removes_record() {
        let (store, _) = counting_store(MemoryKeyValueStore::default());
        store.save_config(&sample(), |_| panic!("save failed"));
        assert!(store.get_config(|_| ()).is_some());
        store.clear_config(|_| panic!("clear failed"));
        assert_eq!(store.get_config(|_| ()), None);
    }
}
