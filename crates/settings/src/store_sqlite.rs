//! SQLite-backed settings store using sqlx.

use {
    async_trait::async_trait,
    sqlx::{Row, SqlitePool, sqlite::SqlitePoolOptions},
};

use crate::{Error, Result, store::SettingsStore, types::ProjectSettings};

/// SQLite-backed persistence. Records are stored as JSON documents under
/// their settings key, so the schema never changes when a field is added.
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    /// Connect a new pool and create the schema if it does not exist yet.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Reuse an existing pool (migrations must already have run).
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS settings (
             key  TEXT PRIMARY KEY,
             data TEXT NOT NULL
         )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<ProjectSettings>> {
        let row = sqlx::query("SELECT data FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let data: String = row.get("data");
                Ok(Some(serde_json::from_str(&data)?))
            },
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, settings: &ProjectSettings) -> Result<()> {
        let data = serde_json::to_string(settings)?;
        sqlx::query(
            "INSERT INTO settings (key, data) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET data = excluded.data",
        )
        .bind(key)
        .bind(&data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found(key));
        }
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    async fn make_store() -> SqliteSettingsStore {
        SqliteSettingsStore::new("sqlite::memory:").await.unwrap()
    }

    fn make_settings(project_id: &str) -> ProjectSettings {
        ProjectSettings {
            project_id: project_id.into(),
            token: "tok".into(),
            subscription_id: "sub".into(),
            secret: "sec".into(),
            bot_name: "helpbot".into(),
            bot_token: "123:ABC".into(),
            show_info_message: true,
        }
    }

    #[tokio::test]
    async fn roundtrip_preserves_every_field() {
        let store = make_store().await;
        let settings = make_settings("p1");
        store.set("telegram-p1", &settings).await.unwrap();
        let loaded = store.get("telegram-p1").await.unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn upsert_replaces_existing() {
        let store = make_store().await;
        store
            .set("telegram-p1", &make_settings("p1"))
            .await
            .unwrap();
        let mut updated = make_settings("p1");
        updated.show_info_message = false;
        store.set("telegram-p1", &updated).await.unwrap();
        let loaded = store.get("telegram-p1").await.unwrap().unwrap();
        assert!(!loaded.show_info_message);
    }

    #[tokio::test]
    async fn remove_missing_is_not_found() {
        let store = make_store().await;
        let err = store.remove("telegram-nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn records_survive_a_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("settings.db").display()
        );
        {
            let store = SqliteSettingsStore::new(&url).await.unwrap();
            store
                .set("telegram-p1", &make_settings("p1"))
                .await
                .unwrap();
        }
        let store = SqliteSettingsStore::new(&url).await.unwrap();
        let loaded = store.get("telegram-p1").await.unwrap().unwrap();
        assert_eq!(loaded.project_id, "p1");
    }
}
