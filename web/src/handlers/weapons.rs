//! Weapon record endpoints.
//!
//! Thin adapters from HTTP to [`WeaponService`](armory_core::WeaponService):
//! extract the payload, call the service, and map the outcome onto a status.
//! JSON bodies are taken as `Result<Json<T>, JsonRejection>` so malformed
//! input renders through [`AppError`] like every other failure.

use crate::{WebResult, error::AppError, state::AppState};
use armory_core::weapon::{CreateWeaponRequest, UpdateWeaponRequest, WeaponId, WeaponRecord};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

/// `GET /weapons` - every stored weapon, in store order.
pub async fn list_weapons(State(state): State<AppState>) -> WebResult<Json<Vec<WeaponRecord>>> {
    let weapons = state.service.get_all().await?;
    Ok(Json(weapons))
}

/// `GET /weapons/{id}` - one weapon, or 404.
pub async fn get_weapon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<WeaponRecord>> {
    let id = WeaponId::new(id);
    state
        .service
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Weapon", &id))
}

/// `POST /weapons` - create a weapon.
///
/// Responds 201 with the stored record, or 409 when the code is taken.
pub async fn create_weapon(
    State(state): State<AppState>,
    payload: Result<Json<CreateWeaponRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<WeaponRecord>)> {
    let Json(request) = payload?;
    let created = state.service.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /weapons` - replace name, code and description of an existing weapon.
///
/// The target id travels in the body. Responds 404 for an unknown id.
pub async fn update_weapon(
    State(state): State<AppState>,
    payload: Result<Json<UpdateWeaponRequest>, JsonRejection>,
) -> WebResult<Json<WeaponRecord>> {
    let Json(request) = payload?;
    let updated = state.service.update(request).await?;
    Ok(Json(updated))
}

/// `DELETE /weapons/{id}` - always 204, whether or not the id existed.
pub async fn delete_weapon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.service.delete_by_id(&WeaponId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
