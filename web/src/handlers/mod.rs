//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by domain.

pub mod health;
pub mod weapons;

pub use health::{health_check, readiness_check};
pub use weapons::{create_weapon, delete_weapon, get_weapon, list_weapons, update_weapon};
