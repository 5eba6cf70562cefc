//! In-memory store adapters for fast, deterministic tests.
//!
//! - [`InMemoryWeaponStore`]: `BTreeMap`-backed document storage
//! - [`UnavailableWeaponStore`]: every call fails with `Unavailable`

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use armory_core::store::{StoreFuture, WeaponStore, WeaponStoreError};
use armory_core::weapon::{WeaponId, WeaponRecord};
use std::collections::BTreeMap;
use std::future::ready;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory weapon store.
///
/// Assigns 24-character lowercase hex ids from a counter, so ids sort in
/// insertion order and `find_all` returns records oldest first. Counters for
/// existence checks and writes let tests assert how many store calls an
/// operation made.
///
/// # Example
///
/// ```
/// use armory_testing::InMemoryWeaponStore;
/// use armory_core::store::WeaponStore;
/// use armory_core::weapon::WeaponRecord;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryWeaponStore::new();
///
/// let saved = store.insert(WeaponRecord::new("Laser", "L1", "Pew pew")).await?;
/// assert_eq!(saved.id.as_ref().map(|id| id.as_str().len()), Some(24));
/// assert_eq!(store.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryWeaponStore {
    records: Arc<RwLock<BTreeMap<WeaponId, WeaponRecord>>>,
    next_id: Arc<AtomicU64>,
    exists_checks: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryWeaponStore {
    /// Create a new empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Snapshot of a stored record, bypassing the adapter trait.
    #[must_use]
    pub fn get(&self, id: &WeaponId) -> Option<WeaponRecord> {
        self.records.read().unwrap().get(id).cloned()
    }

    /// How many `exists_by_code` calls have been made.
    #[must_use]
    pub fn exists_checks(&self) -> usize {
        self.exists_checks.load(Ordering::SeqCst)
    }

    /// How many `insert`/`save` calls have been made.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn assign_id(&self) -> WeaponId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        WeaponId::new(format!("{n:024x}"))
    }

    fn upsert(&self, mut record: WeaponRecord) -> WeaponRecord {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let id = match record.id.clone() {
            Some(id) => id,
            None => self.assign_id(),
        };
        record.id = Some(id.clone());
        self.records.write().unwrap().insert(id, record.clone());
        record
    }
}

impl WeaponStore for InMemoryWeaponStore {
    fn exists_by_code<'a>(&'a self, code: &'a str) -> StoreFuture<'a, bool> {
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        let exists = self
            .records
            .read()
            .unwrap()
            .values()
            .any(|record| record.code == code);
        Box::pin(ready(Ok(exists)))
    }

    fn insert(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        Box::pin(ready(Ok(self.upsert(record))))
    }

    fn save(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        Box::pin(ready(Ok(self.upsert(record))))
    }

    fn find_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, Option<WeaponRecord>> {
        Box::pin(ready(Ok(self.get(id))))
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<WeaponRecord>> {
        let records = self.records.read().unwrap().values().cloned().collect();
        Box::pin(ready(Ok(records)))
    }

    fn delete_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, ()> {
        self.records.write().unwrap().remove(id);
        Box::pin(ready(Ok(())))
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        let count = self.len() as u64;
        Box::pin(ready(Ok(count)))
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        self.records.write().unwrap().clear();
        Box::pin(ready(Ok(())))
    }
}

/// Store adapter whose every operation fails with
/// [`WeaponStoreError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableWeaponStore;

impl UnavailableWeaponStore {
    fn fail<T: Send + 'static>() -> StoreFuture<'static, T> {
        Box::pin(ready(Err(WeaponStoreError::Unavailable(
            "connection refused".to_string(),
        ))))
    }
}

impl WeaponStore for UnavailableWeaponStore {
    fn exists_by_code<'a>(&'a self, _code: &'a str) -> StoreFuture<'a, bool> {
        Self::fail()
    }

    fn insert(&self, _record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        Self::fail()
    }

    fn save(&self, _record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        Self::fail()
    }

    fn find_by_id<'a>(&'a self, _id: &'a WeaponId) -> StoreFuture<'a, Option<WeaponRecord>> {
        Self::fail()
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<WeaponRecord>> {
        Self::fail()
    }

    fn delete_by_id<'a>(&'a self, _id: &'a WeaponId) -> StoreFuture<'a, ()> {
        Self::fail()
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        Self::fail()
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        Self::fail()
    }
}
