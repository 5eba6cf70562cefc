//! Application state for Axum handlers.

use armory_core::WeaponService;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap: the service holds its store and clock behind `Arc`s.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Weapon lifecycle service.
    pub service: WeaponService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(service: WeaponService) -> Self {
        Self { service }
    }
}
