//! Route registration — system endpoints + business modules + guard layer.

use std::sync::Arc;

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use hfp_core::Module;
use hfp_guard::{guard_middleware, GuardConfig};

/// Build the complete router.
///
/// Each module mounts under `/{name}`. The negative-value guard wraps the
/// whole router, so every module gets the same boundary policy and the
/// `/stock` carve-out sees the full request path.
pub fn build_router(guard: Arc<GuardConfig>, modules: &[&dyn Module]) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for module in modules {
        app = app.nest(&format!("/{}", module.name()), module.routes());
    }

    app.layer(middleware::from_fn_with_state(guard, guard_middleware))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "hfpd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use hfp_inventory::InventoryModule;
    use hfp_rates::{RatesConfig, RatesModule};
    use tower::ServiceExt;

    fn app() -> Router {
        let rates = RatesModule::new(RatesConfig {
            cutoff_hour_ist: None,
        });
        let inventory = InventoryModule::new();
        let modules: Vec<&dyn Module> = vec![&rates, &inventory];
        build_router(Arc::new(GuardConfig::default()), &modules)
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let body = match body {
            Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
            None => Body::empty(),
        };
        let req = builder.body(body).unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::json!(null)
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::json!(null))
        };
        (status, json)
    }

    #[tokio::test]
    async fn health_and_version() {
        let router = app();
        let (status, body) = call(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = call(&router, "GET", "/version", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "hfpd");
    }

    #[tokio::test]
    async fn guard_rejects_negative_rate_publish() {
        let router = app();
        let (status, body) = call(
            &router,
            "POST",
            "/rates/daily",
            Some(serde_json::json!({
                "effectiveDate": "2026-08-30",
                "category": "LATEX60",
                "inr": -180.0,
                "usd": 2.2,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Negative values are not allowed");
        assert_eq!(body["fields"], serde_json::json!(["body.inr"]));
    }

    #[tokio::test]
    async fn rate_publish_and_latest_flow() {
        let router = app();
        let (status, _) = call(
            &router,
            "POST",
            "/rates/daily",
            Some(serde_json::json!({
                "effectiveDate": "2026-08-30",
                "category": "LATEX60",
                "inr": 182.5,
                "usd": 2.2,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&router, "GET", "/rates/daily?category=LATEX60", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inr"], 182.5);
        assert_eq!(body["effectiveDate"], "2026-08-30");
    }

    #[tokio::test]
    async fn stock_adjustment_accepts_negative_delta() {
        let router = app();
        let (status, _) = call(
            &router,
            "POST",
            "/inventory/stock",
            Some(serde_json::json!({
                "productName": "latex",
                "quantityLiters": 100.0,
                "minThreshold": 20.0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Negative delta passes the guard (route contains /stock) and is
        // applied by the service.
        let (status, body) = call(
            &router,
            "PUT",
            "/inventory/stock/latex",
            Some(serde_json::json!({ "quantityChange": -30.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quantityLiters"], 70.0);
    }

    #[tokio::test]
    async fn stock_adjustment_floors_at_zero() {
        let router = app();
        call(
            &router,
            "POST",
            "/inventory/stock",
            Some(serde_json::json!({ "productName": "ammonia", "quantityLiters": 10.0 })),
        )
        .await;

        let (status, body) = call(
            &router,
            "PUT",
            "/inventory/stock/ammonia",
            Some(serde_json::json!({ "quantityChange": -50.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn guard_scans_query_on_module_routes() {
        let router = app();
        let (status, body) = call(&router, "GET", "/rates/daily/history?limit=-5", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"], serde_json::json!(["query.limit"]));
    }
}
