//! `/api/nutrition` handlers

use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pantry_nutrition::{FormattedNutrition, SearchResult};
use pantry_telemetry::{Timer, metrics};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

const MISSING_NAME: &str = "请提供食材名称";
const SEARCH_EXAMPLE: &str = "/api/nutrition/search?foodName=苹果";
const NOT_FOUND: &str = "未找到相关食材营养信息";
const NOT_FOUND_HINTS: [&str; 3] = [
    "请尝试使用更具体的食材名称",
    "检查食材名称拼写是否正确",
    "可以尝试搜索相似的食材",
];

#[derive(Debug, Deserialize)]
pub struct FoodNameQuery {
    #[serde(rename = "foodName")]
    food_name: Option<String>,
}

impl FoodNameQuery {
    fn name(&self) -> Option<&str> {
        self.food_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedResult {
    #[serde(flatten)]
    result: SearchResult,
    nutrition_formatted: FormattedNutrition,
}

/// GET /api/nutrition/search?foodName=
pub async fn search(State(state): State<Arc<AppState>>, Query(query): Query<FoodNameQuery>) -> Response {
    let Some(name) = query.name() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": MISSING_NAME, "example": SEARCH_EXAMPLE })),
        )
            .into_response();
    };

    let timer = Timer::start("nutrition.search_ms");
    let results = state.resolver.resolve(name).await;
    timer.stop();

    let Some(top) = results.first() else {
        metrics().increment("nutrition.miss");
        info!(query = %name, "No nutrition data found");
        let mut hints: Vec<String> = NOT_FOUND_HINTS.iter().map(ToString::to_string).collect();
        let close = state.resolver.did_you_mean(name, 3);
        if !close.is_empty() {
            hints.insert(0, format!("您是不是要找：{}", close.join("、")));
        }
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": NOT_FOUND, "suggestions": hints })),
        )
            .into_response();
    };
    metrics().increment(&format!("nutrition.source.{}", top.source().as_str()));

    let results: Vec<FormattedResult> = results
        .into_iter()
        .map(|result| FormattedResult {
            nutrition_formatted: result.formatted(),
            result,
        })
        .collect();

    Json(json!({
        "success": true,
        "query": name,
        "count": results.len(),
        "results": results,
    }))
    .into_response()
}

/// GET /api/nutrition/suggestions?foodName=
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FoodNameQuery>,
) -> Response {
    let Some(name) = query.name() else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": MISSING_NAME }))).into_response();
    };

    let suggestions = state.resolver.suggestions(name).await;
    Json(json!({
        "success": true,
        "foodName": name,
        "suggestions": suggestions,
    }))
    .into_response()
}

/// GET /api/nutrition/foods
pub async fn foods(State(state): State<Arc<AppState>>) -> Response {
    let catalogue = state.resolver.foods();
    Json(json!({
        "success": true,
        "count": catalogue.len(),
        "foods": catalogue.foods,
        "categories": catalogue.categories,
    }))
    .into_response()
}
