//! Weapon record service: server wiring.
//!
//! The binary in `main.rs` loads [`config::Config`], connects the `PostgreSQL`
//! document store, optionally wraps it in the auditing decorator, seeds it,
//! and serves the `armory-web` router until [`lifecycle::shutdown_signal`]
//! fires.

#![forbid(unsafe_code)]

pub mod config;
pub mod lifecycle;

pub use config::Config;
