//! # Armory Testing
//!
//! Testing utilities and helpers for the weapon record service.
//!
//! This crate provides:
//! - [`InMemoryWeaponStore`]: `BTreeMap`-backed store adapter with call counters
//! - [`UnavailableWeaponStore`]: adapter whose every call fails, for error paths
//! - [`FixedClock`] / [`SteppingClock`]: deterministic time
//! - Request fixtures
//!
//! ## Example
//!
//! ```ignore
//! use armory_testing::{InMemoryWeaponStore, test_clock};
//! use armory_core::WeaponService;
//!
//! #[tokio::test]
//! async fn creates_tank() {
//!     let store = Arc::new(InMemoryWeaponStore::new());
//!     let service = WeaponService::new(store.clone(), Arc::new(test_clock()));
//!
//!     service.create(fixtures::tank()).await.unwrap();
//!     assert_eq!(store.len(), 1);
//! }
//! ```

use armory_core::environment::Clock;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

mod store_mocks;

pub use store_mocks::{InMemoryWeaponStore, UnavailableWeaponStore};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Duration, Mutex, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use armory_testing::mocks::FixedClock;
    /// use armory_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step after every reading.
    ///
    /// Lets tests assert strict ordering of modification timestamps.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// Start at `start`, advancing by `step` per call to `now`.
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        #[allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
        fn now(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().unwrap();
            let current = *next;
            *next = current + self.step;
            current
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Request fixtures shared by the service and HTTP tests.
pub mod fixtures {
    use armory_core::weapon::{CreateWeaponRequest, UpdateWeaponRequest, WeaponId};

    /// `{Tank, 002, heavy}`
    #[must_use]
    pub fn tank() -> CreateWeaponRequest {
        CreateWeaponRequest::new("Tank", "002", "heavy")
    }

    /// `{id, Heavy Tank, 002, heavy}`
    #[must_use]
    pub fn heavy_tank(id: WeaponId) -> UpdateWeaponRequest {
        UpdateWeaponRequest::new(id, "Heavy Tank", "002", "heavy")
    }

    /// A create request with the given code and generic name/description.
    #[must_use]
    pub fn weapon_with_code(code: &str) -> CreateWeaponRequest {
        CreateWeaponRequest::new(format!("Weapon {code}"), code, "Test Description")
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SteppingClock, test_clock};
