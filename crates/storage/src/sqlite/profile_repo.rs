use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{ProfileRepository, StorageError};

use super::SqliteRepository;

const USER_NAME_KEY: &str = "user_name";

#[async_trait]
impl ProfileRepository for SqliteRepository {
    async fn get_user_name(&self) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM profile WHERE key = ?1")
            .bind(USER_NAME_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(value))
    }

    async fn save_user_name(&self, name: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO profile (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(USER_NAME_KEY)
        .bind(name)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
