use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use hfp_core::ServiceError;

use crate::model::{AdjustStock, CreateStockItem};
use crate::service::InventoryService;

/// Shared application state.
pub type AppState = Arc<InventoryService>;

/// Build the inventory API router.
///
/// All routes are relative — the caller nests them under `/inventory`, so
/// every full path contains `/stock` and the request guard passes it
/// through (adjustments carry negative deltas).
pub fn build_router(svc: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/stock", get(list_stock).post(create_stock))
        .route("/stock/{name}", get(get_stock).put(adjust_stock))
        .with_state(svc)
}

async fn list_stock(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let items = svc.list()?;
    let total = items.len();
    Ok(Json(serde_json::json!({
        "items": items,
        "total": total,
    })))
}

async fn create_stock(
    State(svc): State<AppState>,
    Json(input): Json<CreateStockItem>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let item = svc.create(input)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::to_value(item).unwrap()),
    ))
}

async fn get_stock(
    State(svc): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let item = svc.get(&name)?;
    Ok(Json(serde_json::to_value(item).unwrap()))
}

async fn adjust_stock(
    State(svc): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<AdjustStock>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let item = svc.adjust(&name, input.quantity_change)?;
    Ok(Json(serde_json::to_value(item).unwrap()))
}
