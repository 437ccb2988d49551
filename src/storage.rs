use std::collections::HashMap;

use thiserror::Error;

pub const THEME_KEY: &str = "theme";
pub const CONSENT_KEY: &str = "cookieConsent";
pub const CONSENT_TIMESTAMP_KEY: &str = "cookieConsentTimestamp";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("local storage rejected write to `{key}`")]
    WriteRejected { key: String },
}

/// Flat string key/value persistence, the shape of `window.localStorage`.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Writes are best effort: a failed write is logged and the in-memory state
/// keeps the new value.
pub fn persist(store: &mut dyn PreferenceStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        tracing::warn!("storage: {err}");
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `localStorage` through gloo's raw handle so values stay plain strings
/// rather than JSON.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn open() -> Self {
        use gloo_storage::{LocalStorage, Storage};

        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .map(|_| LocalStorage::raw());
        if storage.is_none() {
            tracing::warn!("storage: localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::WriteRejected {
                key: key.to_string(),
            })
    }
}
