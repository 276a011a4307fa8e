use std::collections::BTreeMap;

/// Session storage key shared by every page of a deployment.
pub const DEFAULT_STORAGE_KEY: &str = "xtranumerik_cart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartStorageError {
    StorageUnavailable,
    Io(String),
}

impl std::fmt::Display for CartStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartStorageError::StorageUnavailable => {
                write!(f, "browser session storage unavailable")
            }
            CartStorageError::Io(msg) => write!(f, "cart storage error: {msg}"),
        }
    }
}

impl std::error::Error for CartStorageError {}

/// Raw string key/value persistence for the serialized cart.
///
/// Implementations store opaque strings; (de)serialization and corruption
/// handling live in [`crate::CartStore`].
pub trait CartStorage {
    fn load(&self, key: &str) -> Result<Option<String>, CartStorageError>;
    fn save(&mut self, key: &str, raw: &str) -> Result<(), CartStorageError>;
    fn remove(&mut self, key: &str) -> Result<(), CartStorageError>;
}

/// Process-local storage used by tests, native tools, and as the fallback
/// when the browser refuses session storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartStorage {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl InMemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let mut s = Self::default();
        s.entries.insert(key.into(), raw.into());
        s
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of `save`/`remove` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CartStorage for InMemoryCartStorage {
    fn load(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<(), CartStorageError> {
        self.writes += 1;
        self.entries.insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CartStorageError> {
        self.writes += 1;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{CartStorage, CartStorageError};

    /// `window.sessionStorage`: cleared when the tab's browsing session ends.
    #[derive(Debug)]
    pub struct SessionStorageCartStorage {
        storage: web_sys::Storage,
    }

    impl SessionStorageCartStorage {
        pub fn new() -> Result<Self, CartStorageError> {
            Ok(Self {
                storage: window_session_storage()?,
            })
        }
    }

    impl CartStorage for SessionStorageCartStorage {
        fn load(&self, key: &str) -> Result<Option<String>, CartStorageError> {
            self.storage
                .get_item(key)
                .map_err(|e| CartStorageError::Io(format!("get_item({key}) failed: {:?}", e)))
        }

        fn save(&mut self, key: &str, raw: &str) -> Result<(), CartStorageError> {
            self.storage
                .set_item(key, raw)
                .map_err(|e| CartStorageError::Io(format!("set_item({key}) failed: {:?}", e)))
        }

        fn remove(&mut self, key: &str) -> Result<(), CartStorageError> {
            self.storage
                .remove_item(key)
                .map_err(|e| CartStorageError::Io(format!("remove_item({key}) failed: {:?}", e)))
        }
    }

    fn window_session_storage() -> Result<web_sys::Storage, CartStorageError> {
        let win = web_sys::window().ok_or(CartStorageError::StorageUnavailable)?;
        win.session_storage()
            .map_err(|e| CartStorageError::Io(format!("sessionStorage error: {:?}", e)))?
            .ok_or(CartStorageError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::SessionStorageCartStorage;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct SessionStorageCartStorage;

#[cfg(not(target_arch = "wasm32"))]
impl SessionStorageCartStorage {
    pub fn new() -> Result<Self, CartStorageError> {
        Err(CartStorageError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CartStorage for SessionStorageCartStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, CartStorageError> {
        Err(CartStorageError::StorageUnavailable)
    }

    fn save(&mut self, _key: &str, _raw: &str) -> Result<(), CartStorageError> {
        Err(CartStorageError::StorageUnavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<(), CartStorageError> {
        Err(CartStorageError::StorageUnavailable)
    }
}
