//! `PostgreSQL` document store for the weapon record service.
//!
//! This crate implements the `WeaponStore` trait from `armory-core` on top of
//! `PostgreSQL`, treating it as a document database: every weapon is one JSONB
//! document in the `weapons` table, keyed by a store-assigned id.
//!
//! - Ids are 24-character lowercase hex strings generated on first write
//! - `code` is indexed but not unique (uniqueness is a service-level check)
//! - `find_all` returns documents in insertion order
//!
//! # Example
//!
//! ```ignore
//! use armory_postgres::PostgresWeaponStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresWeaponStore::new("postgres://localhost/armory").await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use armory_core::store::{StoreFuture, WeaponStore, WeaponStoreError};
use armory_core::weapon::{WeaponId, WeaponRecord};
use sqlx::PgPool;
use std::fmt::Write as _;

/// `PostgreSQL`-backed weapon store.
#[derive(Clone, Debug)]
pub struct PostgresWeaponStore {
    pool: PgPool,
}

impl PostgresWeaponStore {
    /// Connect to `database_url` with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`WeaponStoreError::Unavailable`] if the database cannot be reached.
    pub async fn new(database_url: &str) -> Result<Self, WeaponStoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| WeaponStoreError::Unavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `weapons` table and its `code` index if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the DDL fails.
    pub async fn migrate(&self) -> Result<(), WeaponStoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weapons (
                id TEXT PRIMARY KEY,
                code TEXT NOT NULL,
                data JSONB NOT NULL,
                inserted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_weapons_code ON weapons(code)")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        tracing::info!("Weapons table ready");
        Ok(())
    }

    async fn write(&self, mut record: WeaponRecord, upsert: bool) -> Result<WeaponRecord, WeaponStoreError> {
        let id = match record.id.clone() {
            Some(id) => id,
            None => generate_id(),
        };
        record.id = Some(id.clone());

        let data = serde_json::to_value(&record)
            .map_err(|e| WeaponStoreError::Serialization(e.to_string()))?;

        let sql = if upsert {
            "INSERT INTO weapons (id, code, data)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                code = EXCLUDED.code,
                data = EXCLUDED.data,
                updated_at = now()"
        } else {
            "INSERT INTO weapons (id, code, data) VALUES ($1, $2, $3)"
        };

        sqlx::query(sql)
            .bind(id.as_str())
            .bind(&record.code)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        tracing::debug!(id = %id, upsert, "Wrote weapon document");
        Ok(record)
    }
}

impl WeaponStore for PostgresWeaponStore {
    fn exists_by_code<'a>(&'a self, code: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let (exists,): (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM weapons WHERE code = $1)")
                    .bind(code)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;
            Ok(exists)
        })
    }

    fn insert(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        Box::pin(self.write(record, false))
    }

    fn save(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        Box::pin(self.write(record, true))
    }

    fn find_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, Option<WeaponRecord>> {
        Box::pin(async move {
            let row: Option<(sqlx::types::JsonValue,)> =
                sqlx::query_as("SELECT data FROM weapons WHERE id = $1")
                    .bind(id.as_str())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

            row.map(|(data,)| decode(data)).transpose()
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<WeaponRecord>> {
        Box::pin(async move {
            let rows: Vec<(sqlx::types::JsonValue,)> =
                sqlx::query_as("SELECT data FROM weapons ORDER BY inserted_at, id")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

            rows.into_iter().map(|(data,)| decode(data)).collect()
        })
    }

    fn delete_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM weapons WHERE id = $1")
                .bind(id.as_str())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            tracing::debug!(id = %id, removed = result.rows_affected(), "Deleted weapon document");
            Ok(())
        })
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM weapons")
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            u64::try_from(count).map_err(|e| WeaponStoreError::Database(e.to_string()))
        })
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM weapons")
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
    }
}

/// Random 12-byte id rendered as 24 lowercase hex characters.
fn generate_id() -> WeaponId {
    let bytes: [u8; 12] = rand::random();
    let hex = bytes.iter().fold(String::with_capacity(24), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    });
    WeaponId::new(hex)
}

fn decode(data: sqlx::types::JsonValue) -> Result<WeaponRecord, WeaponStoreError> {
    serde_json::from_value(data).map_err(|e| WeaponStoreError::Serialization(e.to_string()))
}

/// Connectivity failures become `Unavailable`; everything else is `Database`.
fn map_sqlx_error(error: sqlx::Error) -> WeaponStoreError {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => WeaponStoreError::Unavailable(error.to_string()),
        other => WeaponStoreError::Database(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_24_hex_chars() {
        let id = generate_id();
        assert_eq!(id.as_str().len(), 24);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn pool_timeout_maps_to_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            WeaponStoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            WeaponStoreError::Database(_)
        ));
    }
}
