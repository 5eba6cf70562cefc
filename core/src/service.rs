//! Weapon record lifecycle.
//!
//! [`WeaponService`] owns the only business rules in the system:
//!
//! - **Create** rejects a `code` that already exists, then stamps `created_at`
//!   and starts an empty modification history.
//! - **Update** keeps the stored `id` and `created_at`, overwrites the mutable
//!   fields and appends one timestamp to the history.
//! - **Lookups and deletes** pass straight through to the store.
//!
//! The service holds no state of its own between calls, so it is cheap to
//! clone and safe to share across request tasks.
//!
//! # Known gaps
//!
//! The duplicate check on create and the insert that follows are two separate
//! store calls; concurrent creates with the same `code` can both succeed.
//! Update never re-checks `code` uniqueness.

use crate::environment::Clock;
use crate::store::{WeaponStore, WeaponStoreError};
use crate::weapon::{CreateWeaponRequest, UpdateWeaponRequest, WeaponId, WeaponRecord};
use std::sync::Arc;
use thiserror::Error;

/// Outcome of a rejected lifecycle operation.
#[derive(Error, Debug)]
pub enum WeaponServiceError {
    /// Create rejected: a record with this code already exists.
    #[error("Weapon with code {code} already exists")]
    DuplicateCode {
        /// The conflicting code.
        code: String,
    },

    /// Update target does not exist.
    #[error("Weapon with id {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: WeaponId,
    },

    /// The store failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] WeaponStoreError),
}

/// Stateless lifecycle service over a [`WeaponStore`].
#[derive(Clone)]
pub struct WeaponService {
    store: Arc<dyn WeaponStore>,
    clock: Arc<dyn Clock>,
}

impl WeaponService {
    /// Create a new service.
    ///
    /// # Arguments
    ///
    /// - `store`: Adapter for the document store (optionally wrapped in an
    ///   [`AuditingStore`](crate::audit::AuditingStore))
    /// - `clock`: Source of `created_at` and modification timestamps
    #[must_use]
    pub fn new(store: Arc<dyn WeaponStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The adapter this service writes through.
    #[must_use]
    pub const fn store(&self) -> &Arc<dyn WeaponStore> {
        &self.store
    }

    /// Create a weapon.
    ///
    /// Performs exactly one existence check and at most one insert.
    ///
    /// # Errors
    ///
    /// - [`WeaponServiceError::DuplicateCode`] if `request.code` is already taken
    ///   (nothing is written)
    /// - [`WeaponServiceError::Store`] if the store fails
    #[tracing::instrument(skip(self, request), fields(code = %request.code))]
    pub async fn create(
        &self,
        request: CreateWeaponRequest,
    ) -> Result<WeaponRecord, WeaponServiceError> {
        if self.store.exists_by_code(&request.code).await? {
            tracing::warn!("Create rejected, code already exists");
            metrics::counter!("armory.weapons.rejected", "reason" => "duplicate_code")
                .increment(1);
            return Err(WeaponServiceError::DuplicateCode { code: request.code });
        }

        let record = WeaponRecord {
            id: None,
            name: request.name,
            code: request.code,
            description: request.description,
            created_at: Some(self.clock.now()),
            modification_history: Vec::new(),
            audit: None,
        };

        let created = self.store.insert(record).await?;

        tracing::info!(id = ?created.id, "Weapon created");
        metrics::counter!("armory.weapons.created").increment(1);
        Ok(created)
    }

    /// Replace the mutable fields of an existing weapon.
    ///
    /// The stored `id`, `created_at` and audit metadata are carried over; the
    /// history gains exactly one entry. `code` is not re-checked.
    ///
    /// # Errors
    ///
    /// - [`WeaponServiceError::NotFound`] if no record has `request.id`
    ///   (nothing is written)
    /// - [`WeaponServiceError::Store`] if the store fails
    #[tracing::instrument(skip(self, request), fields(id = %request.id))]
    pub async fn update(
        &self,
        request: UpdateWeaponRequest,
    ) -> Result<WeaponRecord, WeaponServiceError> {
        let Some(persisted) = self.store.find_by_id(&request.id).await? else {
            tracing::warn!("Update target not found");
            metrics::counter!("armory.weapons.rejected", "reason" => "not_found").increment(1);
            return Err(WeaponServiceError::NotFound { id: request.id });
        };

        let mut modification_history = persisted.modification_history;
        modification_history.push(self.clock.now());

        let replacement = WeaponRecord {
            id: persisted.id.or(Some(request.id)),
            name: request.name,
            code: request.code,
            description: request.description,
            created_at: persisted.created_at,
            modification_history,
            audit: persisted.audit,
        };

        let saved = self.store.save(replacement).await?;

        tracing::info!(
            revisions = saved.modification_history.len(),
            "Weapon updated"
        );
        metrics::counter!("armory.weapons.updated").increment(1);
        Ok(saved)
    }

    /// Every stored weapon; empty when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns [`WeaponServiceError::Store`] if the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<WeaponRecord>, WeaponServiceError> {
        let weapons = self.store.find_all().await?;
        tracing::debug!(count = weapons.len(), "Listed weapons");
        Ok(weapons)
    }

    /// Look up one weapon. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`WeaponServiceError::Store`] if the store fails.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn get_by_id(&self, id: &WeaponId) -> Result<Option<WeaponRecord>, WeaponServiceError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Delete one weapon. Deleting an unknown id succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`WeaponServiceError::Store`] if the store fails.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn delete_by_id(&self, id: &WeaponId) -> Result<(), WeaponServiceError> {
        self.store.delete_by_id(id).await?;
        tracing::info!("Weapon deleted");
        metrics::counter!("armory.weapons.deleted").increment(1);
        Ok(())
    }
}

impl std::fmt::Debug for WeaponService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaponService").finish_non_exhaustive()
    }
}
