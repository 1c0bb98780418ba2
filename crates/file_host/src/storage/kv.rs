//! Synchronous string key/value storage contract (the shape of `window.localStorage`).

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Raw string storage keyed by name.
pub trait KeyValueStore {
    /// Loads the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable.
    fn load_raw(&self, key: &str) -> Result<Option<String>, String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the write.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), String>;

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the delete.
    fn remove_raw(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that keeps nothing; used where no browser storage exists.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn load_raw(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_raw(&self, _key: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn remove_raw(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store; clones share the same map.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip_and_remove() {
        let store = MemoryKeyValueStore::default();
        let shared = store.clone();
        store.save_raw("k", "{\"a\":1}").expect("save");
        assert_eq!(
            shared.load_raw("k").expect("load"),
            Some("{\"a\":1}".to_string())
        );
        shared.remove_raw("k").expect("remove");
        assert_eq!(store.load_raw("k").expect("load"), None);
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store: &dyn KeyValueStore = &NoopKeyValueStore;
        store.save_raw("k", "v").expect("save");
        assert_eq!(store.load_raw("k").expect("load"), None);
        store.remove_raw("k").expect("remove");
    }
}
