//! Configuration module for the forum backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::forum::LikeMode;

/// Where forum documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// SQLite file at `db_path`.
    Sqlite,
    /// Process memory; everything is lost on exit.
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to Tantivy search index directory
    pub index_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// How like requests affect counters
    pub like_mode: LikeMode,
    /// Storage backend for forum documents
    pub storage: StorageBackend,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let db_path = env::var("FORUM_DB_PATH")
            .unwrap_or_else(|_| "./data/forum.sqlite".to_string())
            .into();

        let index_path = env::var("FORUM_INDEX_PATH")
            .unwrap_or_else(|_| "./data/index".to_string())
            .into();

        let bind_addr = env::var("FORUM_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| format!("Invalid FORUM_BIND_ADDR format: {}", e))?;

        let log_level = env::var("FORUM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let like_mode = match env::var("FORUM_LIKE_MODE") {
            Ok(value) => value.parse()?,
            Err(_) => LikeMode::default(),
        };

        let storage = match env::var("FORUM_STORAGE").as_deref() {
            Err(_) | Ok("sqlite") => StorageBackend::Sqlite,
            Ok("memory") => StorageBackend::Memory,
            Ok(other) => return Err(format!("Unknown FORUM_STORAGE backend: {}", other)),
        };

        Ok(Self {
            db_path,
            index_path,
            bind_addr,
            log_level,
            like_mode,
            storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: &[&str] = &[
        "FORUM_DB_PATH",
        "FORUM_INDEX_PATH",
        "FORUM_BIND_ADDR",
        "FORUM_LOG_LEVEL",
        "FORUM_LIKE_MODE",
        "FORUM_STORAGE",
    ];

    // Environment variables are process-wide, so every case runs inside one test.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.db_path, PathBuf::from("./data/forum.sqlite"));
        assert_eq!(config.index_path, PathBuf::from("./data/index"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.like_mode, LikeMode::Increment);
        assert_eq!(config.storage, StorageBackend::Sqlite);

        env::set_var("FORUM_LIKE_MODE", "once-per-user");
        env::set_var("FORUM_STORAGE", "memory");
        let config = Config::from_env().unwrap();
        assert_eq!(config.like_mode, LikeMode::OncePerUser);
        assert_eq!(config.storage, StorageBackend::Memory);

        env::set_var("FORUM_STORAGE", "redis");
        assert!(Config::from_env().is_err());

        env::set_var("FORUM_STORAGE", "memory");
        env::set_var("FORUM_BIND_ADDR", "not-an-address");
        assert!(Config::from_env().is_err());

        for var in VARS {
            env::remove_var(var);
        }
    }
}
