//! `/api/users/:user_id/ingredients` handlers
//!
//! Every route is scoped to the owner in the path; another user's ingredient
//! answers 404.

use crate::server::error::AppResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pantry_inventory::{Ingredient, IngredientUpdate, NewIngredient};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    days: Option<i64>,
}

/// GET /api/users/:user_id/ingredients
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Ingredient>>> {
    Ok(Json(state.store.list_ingredients(user_id)?))
}

/// GET /api/users/:user_id/ingredients/expiring?days=N
pub async fn expiring(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ExpiringQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let days = query.days.unwrap_or(state.expiring_window_days);
    Ok(Json(state.store.expiring(user_id, days)?))
}

/// GET /api/users/:user_id/ingredients/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Ingredient>> {
    Ok(Json(state.store.get_ingredient(user_id, id)?))
}

/// POST /api/users/:user_id/ingredients
pub async fn add(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(new_ingredient): Json<NewIngredient>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let ingredient = state.store.add_ingredient(user_id, new_ingredient)?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// PUT /api/users/:user_id/ingredients/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    Json(update): Json<IngredientUpdate>,
) -> AppResult<Json<Ingredient>> {
    Ok(Json(state.store.update_ingredient(user_id, id, update)?))
}

/// DELETE /api/users/:user_id/ingredients/:id
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Value>> {
    let removed = state.store.remove_ingredient(user_id, id)?;
    Ok(Json(json!({
        "success": true,
        "message": "食材已删除",
        "id": removed.id,
    })))
}
