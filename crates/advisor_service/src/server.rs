//! HTTP front end over the predictor

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use stack_advisor_core::{Predictor, Recommendation};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::page::{self, FormValues, Outcome};

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub predictor: Predictor,
}

type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub project_type: String,
    pub team_size: u32,
    pub perf_need: String,
    pub experience: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    /// Formatted message, as shown in the form UI
    pub recommendation: String,
    pub stack: String,
    pub class_code: u32,
    pub confidence_pct: u8,
}

impl From<Recommendation> for RecommendResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            recommendation: rec.to_string(),
            stack: rec.stack,
            class_code: rec.class_code,
            confidence_pct: rec.confidence_pct,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    model_hash: String,
}

pub fn build_router(predictor: Predictor) -> Router {
    let state = Arc::new(AppState { predictor });

    Router::new()
        .route("/", get(handle_index))
        .route("/recommend", post(handle_form))
        .route("/api/recommend", post(handle_api_recommend))
        .route("/api/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn start_server(predictor: Predictor, addr: &str) -> Result<()> {
    let app = build_router(predictor);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind listener on {addr}"))?;

    info!("🚀 Stack Advisor listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => warn!("Unable to listen for shutdown signal: {}", err),
    }
}

async fn handle_index() -> Html<String> {
    Html(page::render(&FormValues::default(), None))
}

async fn handle_form(
    State(state): State<SharedState>,
    Form(values): Form<FormValues>,
) -> Response {
    match recommend_from_form(&state.predictor, &values) {
        Ok(rec) => {
            let outcome = Outcome::Recommendation(rec.to_string());
            Html(page::render(&values, Some(&outcome))).into_response()
        }
        Err(err) => {
            let status = err.status();
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                warn!("form recommendation failed: {}", err);
            }
            let outcome = Outcome::Error(err.to_string());
            (status, Html(page::render(&values, Some(&outcome)))).into_response()
        }
    }
}

fn recommend_from_form(
    predictor: &Predictor,
    values: &FormValues,
) -> Result<Recommendation, ServiceError> {
    let team_size = values
        .team_size
        .trim()
        .parse::<u32>()
        .map_err(|_| ServiceError::TeamSizeNotANumber(values.team_size.clone()))?;

    Ok(predictor.recommend_stack(
        &values.project_type,
        team_size,
        &values.perf_need,
        &values.experience,
    )?)
}

async fn handle_api_recommend(
    State(state): State<SharedState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ServiceError> {
    let Json(request) = payload.map_err(|rej| ServiceError::InvalidRequest(rej.body_text()))?;
    let rec = state.predictor.recommend_stack(
        &request.project_type,
        request.team_size,
        &request.perf_need,
        &request.experience,
    )?;
    Ok(Json(rec.into()))
}

async fn handle_health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "stack-advisor",
        version: env!("CARGO_PKG_VERSION"),
        model_hash: state.predictor.artifacts().model_hash.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use stack_advisor_trainer::{Dataset, Trainer, TrainingParams};
    use tower::ServiceExt;

    fn router() -> Router {
        let artifacts = Trainer::new(TrainingParams::default())
            .unwrap()
            .train(&Dataset::sample())
            .unwrap()
            .into_artifacts()
            .unwrap();
        build_router(Predictor::new(Arc::new(artifacts)))
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/recommend")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/recommend")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Tech Stack Advisor"));
        assert!(html.contains(r#"name="project_type""#));
    }

    #[tokio::test]
    async fn test_form_recommendation() {
        let response = router()
            .oneshot(form_request(
                "project_type=Web+App&team_size=3&perf_need=Medium&experience=Intermediate",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Recommended Tech Stack: Django + PostgreSQL"));
    }

    #[tokio::test]
    async fn test_form_unknown_category_shows_message() {
        let response = router()
            .oneshot(form_request(
                "project_type=Mobile+App&team_size=3&perf_need=Medium&experience=Intermediate",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_string(response).await;
        assert!(html.contains("Error: unknown project_type value: &quot;Mobile App&quot;"));
    }

    #[tokio::test]
    async fn test_form_non_numeric_team_size() {
        let response = router()
            .oneshot(form_request(
                "project_type=API&team_size=many&perf_need=Low&experience=Beginner",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(response).await.contains("team size must be a whole number"));
    }

    #[tokio::test]
    async fn test_api_recommendation() {
        let response = router()
            .oneshot(json_request(serde_json::json!({
                "project_type": "Real-time App",
                "team_size": 6,
                "perf_need": "High",
                "experience": "Expert"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["stack"], "Node.js + Redis");
        assert_eq!(body["confidence_pct"], 100);
        assert_eq!(
            body["recommendation"],
            "🔧 Recommended Tech Stack: Node.js + Redis"
        );
    }

    #[tokio::test]
    async fn test_api_team_size_out_of_range() {
        let response = router()
            .oneshot(json_request(serde_json::json!({
                "project_type": "API",
                "team_size": 11,
                "perf_need": "Low",
                "experience": "Beginner"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["kind"], "invalid_team_size");
    }

    #[tokio::test]
    async fn test_api_malformed_body_returns_error_payload() {
        let bodies = [
            serde_json::json!({
                "project_type": "API",
                "team_size": "ten",
                "perf_need": "Low",
                "experience": "Beginner"
            }),
            serde_json::json!({
                "project_type": "API",
                "team_size": -1,
                "perf_need": "Low",
                "experience": "Beginner"
            }),
            serde_json::json!({
                "project_type": "API",
                "perf_need": "Low",
                "experience": "Beginner"
            }),
        ];

        for body in bodies {
            let response = router().oneshot(json_request(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let body: serde_json::Value =
                serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body["kind"], "invalid_request");
            assert!(body["error"].as_str().unwrap().contains("team_size"));
        }
    }

    #[tokio::test]
    async fn test_health_reports_model_hash() {
        let response = router()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_hash"].as_str().unwrap().len(), 64);
    }
}
