//! Axum boundary layer for the negative-value guard.
//!
//! Applied with `middleware::from_fn_with_state(config, guard_middleware)`.
//! Buffers the request body, scans body and query, and either forwards the
//! request unchanged or rejects it before any handler runs.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, Request, State};
use axum::http::{header, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::error::GuardError;
use crate::scan::{is_bypassed, scan_request, GuardConfig};

/// Fixed message reported for negative-value rejections. Clients match on
/// this together with `fields`.
pub const REJECTION_MESSAGE: &str = "Negative values are not allowed";

/// Boundary rejection — translated straight into a client-facing response.
///
/// Always recoverable: the caller corrects the payload and resubmits.
#[derive(Debug)]
pub enum GuardRejection {
    /// One or more negative values; carries the dot-joined offending paths.
    NegativeValues(Vec<String>),
    /// Nesting exceeded `GuardConfig::max_depth`; the scan failed closed.
    TooDeep,
    /// Body larger than `GuardConfig::max_body_bytes`.
    BodyTooLarge,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            GuardRejection::NegativeValues(fields) => {
                (StatusCode::BAD_REQUEST, REJECTION_MESSAGE.to_string(), fields)
            }
            GuardRejection::TooDeep => (
                StatusCode::BAD_REQUEST,
                "Request is nested too deeply".to_string(),
                Vec::new(),
            ),
            GuardRejection::BodyTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
                Vec::new(),
            ),
        };
        let body = json!({
            "success": false,
            "message": message,
            "fields": fields,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Middleware that rejects requests carrying negative numeric values.
///
/// Routes whose path contains `/stock` are forwarded untouched (stock
/// adjustments carry signed deltas). For everything else the body is
/// buffered, parsed when the content type says JSON, and scanned together
/// with the query string. The forwarded request body is byte-identical to
/// the one received.
pub async fn guard_middleware(
    State(config): State<Arc<GuardConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, GuardRejection> {
    let route = request.uri().path().to_string();
    if is_bypassed(&route) {
        return Ok(next.run(request).await);
    }

    let query = query_value(request.uri());

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, config.max_body_bytes)
        .await
        .map_err(|_| GuardRejection::BodyTooLarge)?;

    // Malformed JSON is not the guard's concern; the downstream extractor
    // rejects it. Non-JSON bodies are opaque and contribute nothing.
    let is_json = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));
    let body_value: Option<Value> = if is_json && !bytes.is_empty() {
        serde_json::from_slice(&bytes).ok()
    } else {
        None
    };

    match scan_request(&route, body_value.as_ref(), query.as_ref(), &config) {
        Ok(found) if found.is_empty() => {
            let request = Request::from_parts(parts, Body::from(bytes));
            Ok(next.run(request).await)
        }
        Ok(found) => {
            let fields: Vec<String> = found.iter().map(|p| p.to_string()).collect();
            tracing::debug!(route = %route, ?fields, "rejecting negative values");
            Err(GuardRejection::NegativeValues(fields))
        }
        Err(err @ GuardError::DepthExceeded { .. }) => {
            tracing::warn!(route = %route, "guard failing closed: {}", err);
            Err(GuardRejection::TooDeep)
        }
    }
}

/// Parse the query string into a string-valued record. Last value wins for
/// repeated keys.
fn query_value(uri: &Uri) -> Option<Value> {
    uri.query()?;
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    let mut record = serde_json::Map::new();
    for (key, value) in pairs {
        record.insert(key, Value::String(value));
    }
    Some(Value::Object(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::routing::{get, post};
    use axum::{middleware, Json, Router};
    use tower::ServiceExt;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    async fn echo(Json(value): Json<Value>) -> Json<Value> {
        Json(value)
    }

    fn app(config: GuardConfig) -> Router {
        let config = Arc::new(config);
        Router::new()
            .route("/api/rates/update", post(ok_handler))
            .route("/api/admin/stock/adjust", post(ok_handler))
            .route("/api/orders", post(ok_handler))
            .route("/api/echo", post(echo))
            .route("/api/search", get(ok_handler))
            .layer(middleware::from_fn_with_state(config, guard_middleware))
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
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
            json!(null)
        } else {
            serde_json::from_slice(&bytes).unwrap_or(json!(null))
        };
        (status, json)
    }

    #[tokio::test]
    async fn negative_body_field_rejected() {
        let router = app(GuardConfig::default());
        let (status, body) = call(
            &router,
            "POST",
            "/api/rates/update",
            Some(json!({ "marketRate": -5, "companyRate": 10 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!(REJECTION_MESSAGE));
        assert_eq!(body["fields"], json!(["body.marketRate"]));
    }

    #[tokio::test]
    async fn valid_body_proceeds() {
        let router = app(GuardConfig::default());
        let (status, _) = call(
            &router,
            "POST",
            "/api/rates/update",
            Some(json!({ "marketRate": 5, "companyRate": 10 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn stock_route_bypassed() {
        let router = app(GuardConfig::default());
        let (status, _) = call(
            &router,
            "POST",
            "/api/admin/stock/adjust",
            Some(json!({ "delta": -20 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn nested_sequence_violation_reported() {
        let router = app(GuardConfig::default());
        let (status, body) = call(
            &router,
            "POST",
            "/api/orders",
            Some(json!({ "items": [{ "qty": 3 }, { "qty": -1 }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"], json!(["body.items.1.qty"]));
    }

    #[tokio::test]
    async fn numeric_query_string_rejected() {
        let router = app(GuardConfig::default());
        let (status, body) = call(&router, "GET", "/api/search?minPrice=-10", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"], json!(["query.minPrice"]));
    }

    #[tokio::test]
    async fn non_numeric_query_string_proceeds() {
        let router = app(GuardConfig::default());
        let (status, _) = call(&router, "GET", "/api/search?label=-10off", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn body_violations_listed_before_query() {
        let router = app(GuardConfig::default());
        let (status, body) = call(
            &router,
            "POST",
            "/api/orders?minPrice=-10",
            Some(json!({ "qty": -1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"], json!(["body.qty", "query.minPrice"]));
    }

    #[tokio::test]
    async fn forwarded_body_is_unchanged() {
        let router = app(GuardConfig::default());
        let payload = json!({ "qty": 3, "note": "-5kg", "nested": { "ok": true } });
        let (status, body) = call(&router, "POST", "/api/echo", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn non_finite_strings_proceed() {
        let router = app(GuardConfig::default());
        let (status, _) = call(
            &router,
            "POST",
            "/api/orders",
            Some(json!({ "a": "-inf", "b": "nan" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn deep_nesting_fails_closed() {
        let router = app(GuardConfig {
            max_depth: 4,
            ..GuardConfig::default()
        });
        let mut value = json!(1);
        for _ in 0..10 {
            value = json!({ "inner": value });
        }
        let (status, body) = call(&router, "POST", "/api/orders", Some(value)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["fields"], json!([]));
    }

    #[tokio::test]
    async fn oversized_body_rejected() {
        let router = app(GuardConfig {
            max_body_bytes: 64,
            ..GuardConfig::default()
        });
        let big = "x".repeat(1024);
        let (status, _) = call(&router, "POST", "/api/orders", Some(json!({ "note": big }))).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn rejection_is_idempotent() {
        let router = app(GuardConfig::default());
        let payload = json!({ "qty": -1 });
        let (s1, b1) = call(&router, "POST", "/api/orders", Some(payload.clone())).await;
        let (s2, b2) = call(&router, "POST", "/api/orders", Some(payload)).await;
        assert_eq!(s1, s2);
        assert_eq!(b1, b2);
    }
}
