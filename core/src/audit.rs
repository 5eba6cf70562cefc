//! Optional audit stamping around store writes.
//!
//! [`AuditingStore`] wraps any [`WeaponStore`] and fills the record's
//! [`AuditMetadata`] on `insert` and `save`. It sits outside the lifecycle
//! service: the service neither reads nor requires these fields, and records
//! written through an undecorated adapter keep `audit == None`.
//!
//! # Example
//!
//! ```ignore
//! use armory_core::audit::{AuditConfig, AuditingStore};
//!
//! let store = AuditingStore::new(postgres_store, AuditConfig::system_user(), clock);
//! let service = WeaponService::new(Arc::new(store), clock);
//! ```

use crate::environment::Clock;
use crate::store::{StoreFuture, WeaponStore};
use crate::weapon::{AuditMetadata, WeaponId, WeaponRecord};
use std::sync::Arc;

/// Resolves the user name recorded in audit fields.
pub type CurrentUser = Arc<dyn Fn() -> String + Send + Sync>;

/// Audit decorator settings.
#[derive(Clone)]
pub struct AuditConfig {
    /// When `false` every call passes straight through.
    pub enabled: bool,
    /// Who is performing the write.
    pub current_user: CurrentUser,
}

impl AuditConfig {
    /// Enabled config that records a fixed user name.
    #[must_use]
    pub fn fixed(user: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            enabled: true,
            current_user: Arc::new(move || user.clone()),
        }
    }

    /// Enabled config that records the operating-system user running the process.
    ///
    /// Reads `USER`, then `USERNAME`, skipping empty values, and falls back to `"system"`.
    #[must_use]
    pub fn system_user() -> Self {
        Self {
            enabled: true,
            current_user: Arc::new(|| {
                ["USER", "USERNAME"]
                    .iter()
                    .filter_map(|key| std::env::var(key).ok())
                    .find(|user| !user.is_empty())
                    .unwrap_or_else(|| "system".to_string())
            }),
        }
    }

    /// Config that leaves records untouched.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            current_user: Arc::new(String::new),
        }
    }
}

impl std::fmt::Debug for AuditConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditConfig")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Store decorator that stamps [`AuditMetadata`] on writes.
pub struct AuditingStore<S> {
    inner: S,
    config: AuditConfig,
    clock: Arc<dyn Clock>,
}

impl<S> AuditingStore<S>
where
    S: WeaponStore,
{
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: S, config: AuditConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            config,
            clock,
        }
    }

    /// The wrapped adapter.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Stamp `record` for a write. Existing `created_*` fields survive; the
    /// `last_modified_*` pair is always refreshed.
    fn stamp(&self, mut record: WeaponRecord) -> WeaponRecord {
        if !self.config.enabled {
            return record;
        }

        let now = self.clock.now();
        let user = (self.config.current_user)();

        record.audit = Some(match record.audit.take() {
            Some(existing) => AuditMetadata {
                last_modified_date: now,
                last_modified_by: user,
                ..existing
            },
            None => AuditMetadata {
                created_date: now,
                created_by: user.clone(),
                last_modified_date: now,
                last_modified_by: user,
            },
        });

        tracing::trace!(code = %record.code, "Stamped audit metadata");
        record
    }
}

impl<S> WeaponStore for AuditingStore<S>
where
    S: WeaponStore,
{
    fn exists_by_code<'a>(&'a self, code: &'a str) -> StoreFuture<'a, bool> {
        self.inner.exists_by_code(code)
    }

    fn insert(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        let mut record = record;
        // A fresh document never inherits audit fields from its caller.
        record.audit = None;
        let record = self.stamp(record);
        self.inner.insert(record)
    }

    fn save(&self, record: WeaponRecord) -> StoreFuture<'_, WeaponRecord> {
        let record = self.stamp(record);
        self.inner.save(record)
    }

    fn find_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, Option<WeaponRecord>> {
        self.inner.find_by_id(id)
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<WeaponRecord>> {
        self.inner.find_all()
    }

    fn delete_by_id<'a>(&'a self, id: &'a WeaponId) -> StoreFuture<'a, ()> {
        self.inner.delete_by_id(id)
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        self.inner.count()
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        self.inner.delete_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_config_reports_user() {
        let config = AuditConfig::fixed("admin");
        assert!(config.enabled);
        assert_eq!((config.current_user)(), "admin");
    }

    #[test]
    fn disabled_config_is_disabled() {
        assert!(!AuditConfig::disabled().enabled);
    }

    #[test]
    fn system_user_is_never_empty() {
        let config = AuditConfig::system_user();
        assert!(!(config.current_user)().is_empty());
    }
}
