//! Axum HTTP surface for the weapon record service.
//!
//! This crate is the imperative shell around [`armory_core::WeaponService`]:
//! it parses requests, calls the service, and maps outcomes to HTTP statuses.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives and gets a correlation id
//! 2. **Extract data** from the path or JSON body
//! 3. **Call** the lifecycle service
//! 4. **Map result** to a status and JSON body via [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! use armory_core::{WeaponService, environment::SystemClock};
//! use armory_web::{AppState, build_router};
//! use std::sync::Arc;
//!
//! let service = WeaponService::new(Arc::new(store), Arc::new(SystemClock));
//! let app = build_router(AppState::new(service));
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
