//! Store adapter trait for weapon documents.
//!
//! The `WeaponStore` trait is the only path from the lifecycle service to the
//! document database. It mirrors the native primitives of a document store
//! and nothing more: no querying beyond lookup by id and existence by code,
//! no pagination, no batch semantics.
//!
//! # Implementations
//!
//! - `PostgresWeaponStore` (in `armory-postgres` crate): JSONB documents in `PostgreSQL`
//! - `InMemoryWeaponStore` (in `armory-testing` crate): Fast, deterministic testing
//! - [`AuditingStore`](crate::audit::AuditingStore): Decorator around either of the above
//!
//! # Dyn Compatibility
//!
//! This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
//! so it can be shared as `Arc<dyn WeaponStore>` by the service and the HTTP state.

use crate::weapon::{WeaponId, WeaponRecord};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Boxed future returned by every [`WeaponStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, WeaponStoreError>> + Send + 'a>>;

/// Errors raised by a store adapter.
///
/// The lifecycle service never translates or retries these; they propagate
/// to the caller unchanged.
#[derive(Error, Debug)]
pub enum WeaponStoreError {
    /// The database could not be reached (connection refused, pool timeout).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(String),

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Narrow document-store interface consumed by the lifecycle service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single adapter instance is shared
/// across every request task.
pub trait WeaponStore: Send + Sync {
    /// Whether any stored record carries `code`.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the store cannot be queried.
    fn exists_by_code<'a>(&'a self, code: &'a str) -> StoreFuture<'a, bool>;

    /// Persist a new record, assigning an id if it has none.
    ///
    /// Returns the record as stored, including the id.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the write fails.
    fn insert(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord>;

    /// Upsert a record keyed by its id, assigning an id if it has none.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the write fails.
    fn save(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord>;

    /// Look up a record by id. Absence is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the store cannot be queried.
    fn find_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, Option<WeaponRecord>>;

    /// Every stored record. An empty store yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the store cannot be queried.
    fn find_all(&self) -> StoreFuture<'_, Vec<WeaponRecord>>;

    /// Remove a record by id. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the delete fails.
    fn delete_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, ()>;

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the store cannot be queried.
    fn count(&self) -> StoreFuture<'_, u64>;

    /// Remove every record. Used by the reset seeding mode and tests.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaponStoreError`] if the delete fails.
    fn delete_all(&self) -> StoreFuture<'_, ()>;
}

impl<S> WeaponStore for Arc<S>
where
    S: WeaponStore + ?Sized,
{
    fn exists_by_code<'a>(&'a self, code: &'a str) -> StoreFuture<'a, bool> {
        (**self).exists_by_code(code)
    }

    fn insert(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        (**self).insert(record)
    }

    fn save(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        (**self).save(record)
    }

    fn find_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, Option<WeaponRecord>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<WeaponRecord>> {
        (**self).find_all()
    }

    fn delete_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, ()> {
        (**self).delete_by_id(id)
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        (**self).count()
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        (**self).delete_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_error_display() {
        let error = WeaponStoreError::Unavailable("pool timed out".to_string());
        assert_eq!(error.to_string(), "Store unavailable: pool timed out");
    }

    #[test]
    fn store_trait_is_dyn_compatible() {
        fn assert_dyn(_: Option<Arc<dyn WeaponStore>>) {}
        assert_dyn(None);
    }
}
