//! `/api/users` handlers

use crate::server::error::AppResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pantry_inventory::{NewUser, User, UserUpdate};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// POST /api/users
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(new_user): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.store.create_user(new_user)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.store.list_users())
}

/// GET /api/users/:user_id
pub async fn get(State(state): State<Arc<AppState>>, Path(user_id): Path<Uuid>) -> AppResult<Json<User>> {
    Ok(Json(state.store.get_user(user_id)?))
}

/// PUT /api/users/:user_id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(update): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    Ok(Json(state.store.update_user(user_id, update)?))
}

/// DELETE /api/users/:user_id
pub async fn remove(State(state): State<Arc<AppState>>, Path(user_id): Path<Uuid>) -> AppResult<Json<Value>> {
    let removed = state.store.remove_user(user_id)?;
    Ok(Json(json!({
        "success": true,
        "removedIngredients": removed,
    })))
}
