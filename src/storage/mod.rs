//! Key-value storage port.
//!
//! The forum persists everything as JSON text under a handful of well-known keys. Any backend
//! that can read and write text by key can host it.

mod memory;

pub use memory::MemoryStore;

use std::future::Future;

use crate::db::SqliteStore;
use crate::errors::AppError;

/// A text key-value store scoped to one forum instance.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`, or `None` when the key was never written.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Storage backend selected by configuration.
pub enum Storage {
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl KeyValueStore for Storage {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        match self {
            Storage::Sqlite(store) => store.read(key).await,
            Storage::Memory(store) => store.read(key).await,
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        match self {
            Storage::Sqlite(store) => store.write(key, value).await,
            Storage::Memory(store) => store.write(key, value).await,
        }
    }
}
