//! Key-value record store

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// String key-value storage (the shape of browser LocalStorage)
pub trait RecordStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", err))
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// Load a JSON list. Missing keys are empty; unparsable data is logged and
/// treated as empty.
pub fn load_list<T: DeserializeOwned>(
    store: &impl RecordStore,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    let Some(json) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&json) {
        Ok(items) => Ok(items),
        Err(err) => {
            log::error!("Error parsing stored {}: {}", key, err);
            Ok(Vec::new())
        }
    }
}

/// Store a list as JSON
pub fn save_list<T: Serialize>(
    store: &mut impl RecordStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(items)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_load_list_missing_and_corrupt() {
        let mut store = MemoryStore::new();
        let items: Vec<u32> = load_list(&store, "nums").unwrap();
        assert!(items.is_empty());

        store.set("nums", "{not json").unwrap();
        let items: Vec<u32> = load_list(&store, "nums").unwrap();
        assert!(items.is_empty());

        save_list(&mut store, "nums", &[1u32, 2, 3]).unwrap();
        let items: Vec<u32> = load_list(&store, "nums").unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
