//! HTTP inference service for the credit-risk model.
//!
//! Routes:
//! - `POST /credit_risk` - assess one loan application
//! - `GET /model_info` - describe the loaded model
//! - `GET /health` - liveness

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::AppError;
pub use state::{ModelSlot, ServerState};

/// Builds the service router over shared, read-only state.
pub fn app(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/credit_risk", post(handlers::credit_risk::predict))
        .route("/model_info", get(handlers::model::info))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use creditrisk_core::{ModelArtifact, PipelineModel, Threshold};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const DEMO_ARTIFACT: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/credit_risk_model.json"));

    fn demo_state() -> Arc<ServerState> {
        let model = PipelineModel::from_artifact(ModelArtifact::from_json_str(DEMO_ARTIFACT).unwrap());
        Arc::new(ServerState::ready(Arc::new(model), Threshold::new(0.35).unwrap()))
    }

    fn sample_application() -> Value {
        json!({
            "Credit_Score": 750, "income": 5000.0, "dtir1": 35.0, "loan_amount": 250000,
            "LTV": 70.0, "property_value": 350000, "open_credit": "nopc", "credit_type": "EXP",
            "co-applicant_credit_type": "CIB", "Credit_Worthiness": 1.0, "rate_of_interest": 4.5,
            "loan_type": "type1", "loan_purpose": "A1", "Gender": "Male", "approv_in_adv": "Y",
            "business_or_commercial": "com", "occupancy_type": "PR", "term": 360, "age": 40,
            "total_units": 1, "Region": "North", "Secured_by": "home", "Security_Type": "direct",
            "submission_of_application": "to_inst", "construction_type": "sb", "loan_limit": "cf",
            "Neg_ammortization": "neg_amm", "interest_only": "int_only",
            "lump_sum_payment": "lpsm", "Interest_rate_spread": 1.0, "Upfront_charges": 1500.0
        })
    }

    async fn post_raw(state: Arc<ServerState>, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/credit_risk")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(state: Arc<ServerState>, body: &Value) -> (StatusCode, Value) {
        post_raw(state, body.to_string()).await
    }

    #[tokio::test]
    async fn test_valid_application() {
        let (status, body) = post(demo_state(), &sample_application()).await;
        assert_eq!(status, StatusCode::OK);

        let p_default = body["probability_default"].as_f64().unwrap();
        let p_solvency = body["probability_solvency"].as_f64().unwrap();
        let threshold = body["threshold_used"].as_f64().unwrap();
        assert!((p_default + p_solvency - 1.0).abs() < 1e-9);
        assert_eq!(threshold, 0.35);

        let class = body["predicted_class"].as_u64().unwrap();
        assert_eq!(class == 1, p_default >= threshold);
        assert_eq!(body["model_used"], "credit-risk-logit@1.0.0");
        assert!(body["prediction_status"].as_str().unwrap().contains("Risk"));
    }

    #[tokio::test]
    async fn test_same_application_same_verdict() {
        let state = demo_state();
        let (_, first) = post(state.clone(), &sample_application()).await;
        let (_, second) = post(state, &sample_application()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_fields_listed() {
        let mut body = sample_application();
        let map = body.as_object_mut().unwrap();
        map.remove("LTV");
        map.remove("loan_limit");

        let (status, body) = post(demo_state(), &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["missing_fields"], json!(["loan_limit", "LTV"]));
        assert!(body["details"].as_str().unwrap().contains("LTV"));
    }

    #[tokio::test]
    async fn test_empty_object_lists_every_column() {
        let (status, body) = post(demo_state(), &json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let expected: Vec<&str> = creditrisk_core::schema::columns().collect();
        assert_eq!(body["missing_fields"], json!(expected));
    }

    #[tokio::test]
    async fn test_non_scalar_field_is_bad_request() {
        let mut body = sample_application();
        body["Region"] = json!(["North"]);
        let (status, body) = post(demo_state(), &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["invalid_fields"], json!(["Region"]));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, body) = post_raw(demo_state(), "{\"Credit_Score\": ".into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

        let (status, _) = post(demo_state(), &json!([1, 2])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_uncoercible_value_is_internal_error() {
        let mut body = sample_application();
        body["income"] = json!("five thousand");
        let (status, body) = post(demo_state(), &body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("income"));
    }

    #[tokio::test]
    async fn test_unavailable_model_fails_every_request() {
        let state = Arc::new(ServerState::unavailable("No such file or directory"));
        for body in [sample_application().to_string(), "{}".to_string(), "garbage".to_string()] {
            let (status, json) = post_raw(state.clone(), body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(json["error"].as_str().unwrap().contains("Model not loaded"));
        }
    }

    #[tokio::test]
    async fn test_model_info() {
        let request = Request::builder().uri("/model_info").body(Body::empty()).unwrap();
        let response = app(demo_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["name"], "credit-risk-logit");
        assert_eq!(body["estimator"], "logistic_regression");
        assert_eq!(body["threshold_used"], 0.35);
        assert_eq!(body["features"].as_array().unwrap().len(), 31);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(Arc::new(ServerState::unavailable("x"))).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
