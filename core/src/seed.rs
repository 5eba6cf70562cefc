//! Demo data seeding.
//!
//! Nothing here runs implicitly. The server binary calls [`seed_store`] only
//! when `SEED_MODE` asks for it, and tests call it directly.

use crate::environment::Clock;
use crate::store::{WeaponStore, WeaponStoreError};
use crate::weapon::WeaponRecord;

/// What to do with existing records before seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Keep existing records; skip seeds whose code is already taken.
    Append,
    /// Delete every record first.
    Reset,
}

/// Result of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Seeds written to the store
    pub inserted: usize,
    /// Seeds skipped because their code already existed
    pub skipped: usize,
}

/// The three demo weapons.
#[must_use]
pub fn default_weapons() -> Vec<WeaponRecord> {
    vec![
        WeaponRecord::new("Assault Rifle", "001", "Infantry weapon"),
        WeaponRecord::new("Tank", "002", "It is very heavy"),
        WeaponRecord::new("FPV drone", "003", "First-person-view strike drone"),
    ]
}

/// Write `weapons` into `store`.
///
/// Each seed gets `created_at = clock.now()` and an empty history; any id it
/// carries is dropped so the store assigns one.
///
/// # Errors
///
/// Returns the first [`WeaponStoreError`] raised by the store. Seeds written
/// before the failure stay written.
#[tracing::instrument(skip(store, clock, weapons), fields(seeds = weapons.len()))]
pub async fn seed_store(
    store: &dyn WeaponStore,
    clock: &dyn Clock,
    weapons: Vec<WeaponRecord>,
    mode: SeedMode,
) -> Result<SeedReport, WeaponStoreError> {
    if mode == SeedMode::Reset {
        store.delete_all().await?;
        tracing::info!("Cleared store before seeding");
    }

    let mut report = SeedReport::default();
    for weapon in weapons {
        if store.exists_by_code(&weapon.code).await? {
            tracing::debug!(code = %weapon.code, "Seed already present");
            report.skipped += 1;
            continue;
        }

        let record = WeaponRecord {
            id: None,
            created_at: Some(clock.now()),
            modification_history: Vec::new(),
            ..weapon
        };
        store.insert(record).await?;
        report.inserted += 1;
    }

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Seeding complete"
    );
    Ok(report)
}
