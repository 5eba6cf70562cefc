//! Router assembly.

use crate::{
    handlers::{
        create_weapon, delete_weapon, get_weapon, health_check, list_weapons, readiness_check,
        update_weapon,
    },
    middleware::correlation_id_layer,
    state::AppState,
};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build the HTTP router.
///
/// Collection routes answer both with and without a trailing slash.
///
/// ```text
/// GET    /weapons        list
/// POST   /weapons        create
/// PUT    /weapons        update (id in body)
/// GET    /weapons/:id    fetch one
/// DELETE /weapons/:id    delete
/// GET    /health         liveness
/// GET    /ready          readiness (probes the store)
/// ```
pub fn build_router(state: AppState) -> Router {
    let collection = get(list_weapons).post(create_weapon).put(update_weapon);

    Router::new()
        .route("/weapons", collection.clone())
        .route("/weapons/", collection)
        .route("/weapons/:id", get(get_weapon).delete(delete_weapon))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
