use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use hfp_core::{ListParams, ServiceError};

use crate::model::PublishRate;
use crate::service::{RatesService, DEFAULT_CATEGORY};

/// Shared application state.
pub type AppState = Arc<RatesService>;

/// Build the rates API router.
///
/// All routes are relative — the caller nests them under `/rates`.
pub fn build_router(svc: Arc<RatesService>) -> Router {
    Router::new()
        .route("/daily", get(latest_rate).post(publish_rate))
        .route("/daily/history", get(rate_history))
        .with_state(svc)
}

#[derive(Debug, Deserialize)]
struct CategoryParams {
    #[serde(default)]
    category: Option<String>,
}

async fn publish_rate(
    State(svc): State<AppState>,
    Json(input): Json<PublishRate>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let rate = svc.publish(input)?;
    Ok(Json(serde_json::json!({
        "message": "Saved successfully",
        "rate": rate,
    })))
}

async fn latest_rate(
    State(svc): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let category = params.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    let rate = svc.latest(category)?;
    Ok(Json(serde_json::to_value(rate).unwrap()))
}

async fn rate_history(
    State(svc): State<AppState>,
    Query(params): Query<CategoryParams>,
    Query(list): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.history(params.category.as_deref(), &list)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}
