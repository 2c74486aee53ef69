use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    StorageUnavailable,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceError::StorageUnavailable => write!(f, "browser storage unavailable"),
            PreferenceError::Corrupt(msg) => write!(f, "stored preference corrupt: {msg}"),
            PreferenceError::Io(msg) => write!(f, "preference storage error: {msg}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

/// Flat string key/value storage for user preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError>;
}

/// Reads `key` and decodes it as JSON.
///
/// Missing and blank values are `Ok(None)`. Bare words that are not valid
/// JSON (e.g. `dark` written by an older build) are retried as a JSON string.
pub fn load_value<T: DeserializeOwned>(
    store: &dyn PreferenceStore,
    key: &str,
) -> Result<Option<T>, PreferenceError> {
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<T>(raw) {
        Ok(v) => Ok(Some(v)),
        Err(first) => serde_json::from_value::<T>(serde_json::Value::String(raw.to_string()))
            .map(Some)
            .map_err(|_| PreferenceError::Corrupt(format!("{key}: {first}"))),
    }
}

pub fn save_value<T: Serialize>(
    store: &mut dyn PreferenceStore,
    key: &str,
    value: &T,
) -> Result<(), PreferenceError> {
    let raw = serde_json::to_string(value).map_err(|e| PreferenceError::Io(e.to_string()))?;
    store.save(key, &raw)?;
    tracing::debug!(key, "preference saved");
    Ok(())
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryPreferenceStore {
    entries: BTreeMap<String, String>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError> {
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{PreferenceError, PreferenceStore};

    /// `window.localStorage`, with every key namespaced under `key_prefix`.
    #[derive(Debug)]
    pub struct LocalStoragePreferenceStore {
        key_prefix: String,
    }

    impl LocalStoragePreferenceStore {
        pub fn new(key_prefix: impl Into<String>) -> Result<Self, PreferenceError> {
            // Check once so callers can fall back to memory up front
            // (private browsing and sandboxed iframes deny access).
            window_local_storage()?;
            Ok(Self {
                key_prefix: key_prefix.into(),
            })
        }

        fn full_key(&self, key: &str) -> String {
            format!("{}.{}", self.key_prefix, key)
        }
    }

    impl PreferenceStore for LocalStoragePreferenceStore {
        fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
            let storage = window_local_storage()?;
            storage
                .get_item(&self.full_key(key))
                .map_err(|e| PreferenceError::Io(format!("get_item({key}) failed: {:?}", e)))
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
            let storage = window_local_storage()?;
            storage
                .set_item(&self.full_key(key), value)
                .map_err(|e| PreferenceError::Io(format!("set_item({key}) failed: {:?}", e)))
        }

        fn remove(&mut self, key: &str) -> Result<bool, PreferenceError> {
            let existed = self.load(key)?.is_some();
            let storage = window_local_storage()?;
            storage
                .remove_item(&self.full_key(key))
                .map_err(|e| PreferenceError::Io(format!("remove_item({key}) failed: {:?}", e)))?;
            Ok(existed)
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, PreferenceError> {
        let win = web_sys::window().ok_or(PreferenceError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| PreferenceError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(PreferenceError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStoragePreferenceStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStoragePreferenceStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStoragePreferenceStore {
    pub fn new(_key_prefix: impl Into<String>) -> Result<Self, PreferenceError> {
        Err(PreferenceError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for LocalStoragePreferenceStore {
    fn load(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
        Err(PreferenceError::StorageUnavailable)
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
        Err(PreferenceError::StorageUnavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<bool, PreferenceError> {
        Err(PreferenceError::StorageUnavailable)
    }
}
