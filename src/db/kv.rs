//! SQLite-backed key-value store.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::storage::KeyValueStore;

/// Key-value store over the `kv_store` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteStore {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_sqlite_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("kv.sqlite"))
            .await
            .unwrap();
        let store = SqliteStore::new(pool);

        assert_eq!(store.read("forumTopics").await.unwrap(), None);

        store.write("forumTopics", "[]").await.unwrap();
        store.write("forumTopics", "[1]").await.unwrap();
        assert_eq!(
            store.read("forumTopics").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn test_sqlite_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("kv.sqlite");

        {
            let store = SqliteStore::new(init_database(&db_path).await.unwrap());
            store.write("forumTopicLikes", "[]").await.unwrap();
        }

        let store = SqliteStore::new(init_database(&db_path).await.unwrap());
        assert_eq!(
            store.read("forumTopicLikes").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
