use cart::{CartStorage, CartStorageError, InMemoryCartStorage, SessionStorageCartStorage};

/// Session storage when the browser allows it, memory otherwise (private
/// modes, sandboxed iframes). The cart then lives for the page only.
#[derive(Debug)]
pub enum SiteCartStorage {
    Session(SessionStorageCartStorage),
    Memory(InMemoryCartStorage),
}

impl SiteCartStorage {
    pub fn new() -> Self {
        match SessionStorageCartStorage::new() {
            Ok(s) => SiteCartStorage::Session(s),
            Err(err) => {
                web_sys::console::log_1(
                    &format!("cart storage unavailable ({err}); keeping the cart in memory").into(),
                );
                SiteCartStorage::Memory(InMemoryCartStorage::new())
            }
        }
    }
}

impl CartStorage for SiteCartStorage {
    fn load(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        match self {
            SiteCartStorage::Session(s) => s.load(key),
            SiteCartStorage::Memory(s) => s.load(key),
        }
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<(), CartStorageError> {
        match self {
            SiteCartStorage::Session(s) => s.save(key, raw),
            SiteCartStorage::Memory(s) => s.save(key, raw),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), CartStorageError> {
        match self {
            SiteCartStorage::Session(s) => s.remove(key),
            SiteCartStorage::Memory(s) => s.remove(key),
        }
    }
}
