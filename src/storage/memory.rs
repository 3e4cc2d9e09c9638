//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::errors::AppError;

/// Process-local key-value store.
///
/// Can be switched into an unavailable state where every read and write fails, which is how
/// tests exercise the forum's behaviour without a working storage backend.
#[derive(Debug)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
    readable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            readable: AtomicBool::new(true),
        }
    }

    /// A store whose reads and writes always fail.
    #[cfg(test)]
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    #[cfg(test)]
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make reads fail while writes keep succeeding.
    #[cfg(test)]
    pub fn set_readable(&self, readable: bool) {
        self.readable.store(readable, Ordering::SeqCst);
    }

    /// Raw stored text, bypassing availability.
    #[cfg(test)]
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Storage("Storage is unavailable".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        self.check_available()?;
        if !self.readable.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Storage read failed".to_string()));
        }
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("Storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.check_available()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("Storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_write() {
        let store = MemoryStore::new();
        assert_eq!(store.read("k").await.unwrap(), None);

        store.write("k", "v1").await.unwrap();
        store.write("k", "v2").await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MemoryStore::unavailable();
        assert!(store.read("k").await.is_err());
        assert!(store.write("k", "v").await.is_err());
        assert_eq!(store.snapshot("k"), None);

        store.set_available(true);
        store.write("k", "v").await.unwrap();
        assert_eq!(store.snapshot("k").as_deref(), Some("v"));
    }
}
