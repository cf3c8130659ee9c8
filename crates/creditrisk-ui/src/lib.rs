//! Form UI for the credit-risk inference service.
//!
//! Renders a localized loan application form, converts the submission to
//! the canonical 31-column record and shows the service's verdict.
//!
//! Routes:
//! - `GET /` - empty form
//! - `POST /evaluate` - assess the submitted form
//! - `GET /health` - liveness

pub mod catalog;
pub mod client;
pub mod form;
pub mod handlers;
pub mod render;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use catalog::Catalog;
pub use client::{ClientError, RiskClient};
pub use state::UiState;

pub fn app(state: Arc<UiState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!("request", method = %req.method(), uri = %req.uri())
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/", get(handlers::form::index))
        .route("/evaluate", post(handlers::form::evaluate))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::extract::{Form, State};
    use axum::http::StatusCode;
    use creditrisk_config::Locale;
    use creditrisk_core::{ModelArtifact, PipelineModel, RiskClass, Threshold};
    use creditrisk_server::ServerState;
    use tower::ServiceExt;

    const DEMO_ARTIFACT: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/credit_risk_model.json"));

    fn ready_service() -> Arc<ServerState> {
        let model = PipelineModel::from_artifact(ModelArtifact::from_json_str(DEMO_ARTIFACT).unwrap());
        Arc::new(ServerState::ready(Arc::new(model), Threshold::new(0.35).unwrap()))
    }

    /// Serves the inference app on an ephemeral port; returns its endpoint URL.
    async fn spawn_service(state: Arc<ServerState>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, creditrisk_server::app(state)).await.unwrap();
        });
        format!("http://{addr}/credit_risk")
    }

    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/credit_risk")
    }

    fn ui_state(url: String, locale: Locale) -> Arc<UiState> {
        Arc::new(UiState {
            client: RiskClient::new(url, Duration::from_secs(10)).unwrap(),
            catalog: Catalog::for_locale(locale),
        })
    }

    fn default_submission(catalog: &Catalog) -> HashMap<String, String> {
        form::fields()
            .map(|field| (field.column.to_string(), field.default_text(catalog)))
            .collect()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let state = ui_state(closed_port_url().await, Locale::Es);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Clasificación de Riesgo Crediticio"));
        assert!(html.contains("action=\"/evaluate\""));
    }

    #[tokio::test]
    async fn test_client_against_live_service() {
        let url = spawn_service(ready_service()).await;
        let client = RiskClient::new(url, Duration::from_secs(10)).unwrap();
        let record = form::default_record(Catalog::for_locale(Locale::Es)).unwrap();

        let verdict = client.assess(&record).await.unwrap();
        assert!((verdict.probability_default + verdict.probability_solvency - 1.0).abs() < 1e-9);
        assert_eq!(verdict.threshold_used, 0.35);
        assert_eq!(
            verdict.predicted_class == RiskClass::Default,
            verdict.probability_default >= 0.35
        );
        assert_eq!(verdict.model_used, "credit-risk-logit@1.0.0");
    }

    #[tokio::test]
    async fn test_client_surfaces_service_errors() {
        let url = spawn_service(ready_service()).await;
        let client = RiskClient::new(url, Duration::from_secs(10)).unwrap();
        let mut record = form::default_record(Catalog::for_locale(Locale::En)).unwrap();
        record.remove("LTV");

        match client.assess(&record).await {
            Err(ClientError::Service { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body["missing_fields"], serde_json::json!(["LTV"]));
            }
            other => panic!("expected a 400, got {other:?}"),
        }

        let url = spawn_service(Arc::new(ServerState::unavailable("missing artifact"))).await;
        let client = RiskClient::new(url, Duration::from_secs(10)).unwrap();
        match client.assess(&record).await {
            Err(ClientError::Service { status, body }) => {
                assert_eq!(status, 500);
                assert!(body["error"].as_str().unwrap().contains("Model not loaded"));
            }
            other => panic!("expected a 500, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_evaluate_shows_verdict() {
        let url = spawn_service(ready_service()).await;
        let state = ui_state(url, Locale::Es);
        let submitted = default_submission(state.catalog);

        let html = handlers::form::evaluate(State(state), Form(submitted)).await.0;
        assert!(html.contains("Resultado de la Evaluación"));
        assert!(html.contains("Umbral: 0.35"));
        assert!(html.contains("class=\"chart\""));
    }

    #[tokio::test]
    async fn test_evaluate_with_service_down() {
        let url = closed_port_url().await;
        let state = ui_state(url.clone(), Locale::Es);
        let mut submitted = default_submission(state.catalog);
        submitted.insert("age".into(), "55".into());

        let html = handlers::form::evaluate(State(state), Form(submitted)).await.0;
        assert!(html.contains(&url));
        assert!(html.contains("No se pudo conectar"));
        assert!(html.contains("name=\"age\" min=\"18\" max=\"80\" step=\"1\" value=\"55\""));
    }

    #[tokio::test]
    async fn test_evaluate_rejects_out_of_range_input() {
        let state = ui_state(closed_port_url().await, Locale::En);
        let mut submitted = default_submission(state.catalog);
        submitted.insert("Credit_Score".into(), "950".into());

        let html = handlers::form::evaluate(State(state), Form(submitted)).await.0;
        assert!(html.contains("Please check the following fields:"));
        assert!(html.contains("<li>Credit Score: must be at most 900</li>"));
        assert!(!html.contains("Could not connect"));
    }

    #[tokio::test]
    async fn test_health() {
        let state = ui_state(closed_port_url().await, Locale::Es);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
