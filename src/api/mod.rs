//! HTTP/JSON REST surface.
//!
//! Routes are a thin pass-through to the services: handlers deserialize the
//! request, call one service operation, and serialize the result. Service
//! errors are rendered as `{"detail": message}` bodies with the status code
//! determined by the error variant.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::{
    ChatMessage, PaperAnalysis, PaperMetadata, ResearchPlan, ResearchPlanDetail, ResearchQuery,
};
use crate::services::{PaperService, PlannerService, ServiceError};

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    planner: Arc<PlannerService>,
    papers: Arc<PaperService>,
}

impl AppState {
    /// Create the application state
    pub fn new(planner: Arc<PlannerService>, papers: Arc<PaperService>) -> Self {
        Self { planner, papers }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/search", post(search_plans))
        .route("/api/plan/:plan_id", get(get_plan))
        .route("/api/chat/:plan_id", post(chat))
        .route("/api/papers", get(search_papers))
        .route("/api/analyze", post(analyze_papers))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Error rendered at the HTTP boundary
///
/// NotFound maps to 404, InvalidRequest to 400, everything else to 500.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Query parameters for paper search
#[derive(Debug, Deserialize)]
struct PaperSearchParams {
    /// Search keywords
    query: String,

    /// Maximum number of papers to return
    #[serde(default = "default_paper_limit")]
    limit: usize,
}

fn default_paper_limit() -> usize {
    10
}

/// Request body for paper analysis
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    /// Identifiers of the papers to analyze
    paper_ids: Vec<String>,
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "message": "ResearchGPT API is running"
    }))
}

async fn search_plans(
    State(state): State<AppState>,
    Json(query): Json<ResearchQuery>,
) -> Result<Json<Vec<ResearchPlan>>, ApiError> {
    let topic = query.query.trim();
    if topic.is_empty() {
        return Err(ServiceError::InvalidRequest("query must not be empty".to_string()).into());
    }

    let plans = state.planner.generate_plans(topic).await?;
    Ok(Json(plans))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<ResearchPlanDetail>, ApiError> {
    let detail = state.planner.get_plan_detail(&plan_id).await?;
    Ok(Json(detail))
}

async fn chat(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Json(message): Json<ChatMessage>,
) -> Result<Json<ChatMessage>, ApiError> {
    // The incoming role and timestamp are ignored; only the content matters
    let reply = state.planner.chat(&plan_id, &message.content).await?;
    Ok(Json(ChatMessage::assistant(reply)))
}

async fn search_papers(
    State(state): State<AppState>,
    Query(params): Query<PaperSearchParams>,
) -> Result<Json<Vec<PaperMetadata>>, ApiError> {
    let papers = state.papers.search(&params.query, params.limit).await?;
    Ok(Json(papers))
}

async fn analyze_papers(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<PaperAnalysis>, ApiError> {
    let analysis = state.papers.analyze(&request.paper_ids).await?;
    Ok(Json(analysis))
}
