//! # Armory Core
//!
//! Core types and business rules for the weapon record service.
//!
//! This crate owns everything with decision logic in it:
//!
//! - **[`weapon`]**: The persisted `WeaponRecord` and the create/update request shapes
//! - **[`store`]**: The narrow `WeaponStore` adapter trait the service talks through
//! - **[`service`]**: `WeaponService`, the record lifecycle (create, update, lookup, delete)
//! - **[`audit`]**: Optional store decorator that stamps created-by/modified-by metadata
//! - **[`seed`]**: Explicitly invoked demo-data seeding
//!
//! ## Data Flow
//!
//! ```text
//! HTTP boundary ──► WeaponService ──► WeaponStore ──► database
//!                        │
//!                        └── Clock (injected, for createdAt / history timestamps)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use armory_core::service::WeaponService;
//! use armory_core::weapon::CreateWeaponRequest;
//!
//! let service = WeaponService::new(store, clock);
//! let tank = service
//!     .create(CreateWeaponRequest::new("Tank", "002", "heavy"))
//!     .await?;
//! assert!(tank.modification_history.is_empty());
//! ```

pub mod audit;
pub mod seed;
pub mod service;
pub mod store;
pub mod weapon;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub use service::{WeaponService, WeaponServiceError};
pub use store::{WeaponStore, WeaponStoreError};
pub use weapon::{AuditMetadata, CreateWeaponRequest, UpdateWeaponRequest, WeaponId, WeaponRecord};

/// Environment module - Dependency injection traits
///
/// External dependencies the service needs besides the store are abstracted
/// behind traits so tests can substitute deterministic implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(time);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock implementation backed by [`Utc::now`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
