//! Integration tests for the ResearchGPT HTTP API.
//!
//! These tests drive the axum router directly, end to end through the
//! services, stores and the mock language model.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use researchgpt_server::api::{router, AppState};
use researchgpt_server::llm::MockLanguageModel;
use researchgpt_server::services::{PaperService, PlannerService, PLAN_NOT_FOUND_REPLY};
use researchgpt_server::sources::{ScholarSource, SemanticScholarSource, SyntheticSource};
use researchgpt_server::store::{MemoryPlanStore, MemorySessionStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Build an app with no external paper source (synthetic fallback only)
fn app() -> Router {
    app_with_external(None)
}

fn app_with_external(external: Option<Arc<dyn ScholarSource>>) -> Router {
    let planner = Arc::new(PlannerService::new(
        Arc::new(MemoryPlanStore::new()),
        Arc::new(MemorySessionStore::new()),
        Arc::new(MockLanguageModel::new()),
    ));
    let papers = Arc::new(PaperService::new(
        external,
        Arc::new(SyntheticSource::new()),
    ));
    router(AppState::new(planner, papers))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_root_reports_online() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "online");
    assert!(body["message"].as_str().unwrap().contains("ResearchGPT"));
}

#[tokio::test]
async fn test_plan_search_detail_and_chat_flow() {
    let app = app();

    // Propose plans for a topic
    let response = app
        .clone()
        .oneshot(post_json("/api/search", json!({"query": "quantum computing"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let plans = body_json(response).await;
    let plans = plans.as_array().unwrap();
    assert_eq!(plans.len(), 3);
    for plan in plans {
        assert!(plan["id"].as_str().is_some());
        assert!(plan["title"].as_str().unwrap().contains("quantum computing"));
        assert!(plan["tags"]
            .as_array()
            .unwrap()
            .contains(&json!("quantum computing")));
    }

    // Expand the first plan
    let plan_id = plans[0]["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(get(&format!("/api/plan/{}", plan_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first_body = body_bytes(response).await;

    let detail: Value = serde_json::from_slice(&first_body).unwrap();
    assert_eq!(detail["id"], plan_id);
    assert_eq!(detail["timeline"].as_array().unwrap().len(), 4);
    assert!(detail["expectedResults"].as_str().is_some());
    assert!(detail["background"].as_str().is_some());

    // A second fetch returns the stored detail byte for byte
    let response = app
        .clone()
        .oneshot(get(&format!("/api/plan/{}", plan_id)))
        .await
        .unwrap();
    assert_eq!(body_bytes(response).await, first_body);

    // Chat about the plan
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/chat/{}", plan_id),
            json!({"role": "user", "content": "what methodology?"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply = body_json(response).await;
    assert_eq!(reply["role"], "assistant");
    assert!(!reply["content"].as_str().unwrap().is_empty());
    assert!(reply["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_unknown_plan_is_404() {
    let response = app().oneshot(get("/api/plan/does-not-exist")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn test_empty_topic_is_rejected() {
    let response = app()
        .oneshot(post_json("/api/search", json!({"query": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_about_unknown_plan_apologizes() {
    let response = app()
        .oneshot(post_json(
            "/api/chat/does-not-exist",
            json!({"role": "user", "content": "hello"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply = body_json(response).await;
    assert_eq!(reply["role"], "assistant");
    assert_eq!(reply["content"], PLAN_NOT_FOUND_REPLY);
}

#[tokio::test]
async fn test_paper_search_caches_external_results() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/paper/search.*".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [
                    {"title": "Scaling Laws", "authors": [{"name": "J. Kaplan"}], "year": 2020},
                    {"title": "Chinchilla", "authors": [{"name": "J. Hoffmann"}], "year": 2022}
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let external: Arc<dyn ScholarSource> =
        Arc::new(SemanticScholarSource::with_api_base(server.url(), None));
    let app = app_with_external(Some(external));

    let response = app
        .clone()
        .oneshot(get("/api/papers?query=scaling&limit=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first_body = body_bytes(response).await;

    let papers: Value = serde_json::from_slice(&first_body).unwrap();
    assert_eq!(papers.as_array().unwrap().len(), 2);
    assert_eq!(papers[0]["title"], "Scaling Laws");
    assert_eq!(papers[0]["authors"][0], "J. Kaplan");

    // Identical call is served from the cache: same body, one upstream request
    let response = app
        .clone()
        .oneshot(get("/api/papers?query=scaling&limit=2"))
        .await
        .unwrap();
    assert_eq!(body_bytes(response).await, first_body);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_paper_search_falls_back_when_source_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/paper/search.*".to_string()),
        )
        .with_status(503)
        .create_async()
        .await;

    let external: Arc<dyn ScholarSource> =
        Arc::new(SemanticScholarSource::with_api_base(server.url(), None));
    let app = app_with_external(Some(external));

    let response = app
        .oneshot(get("/api/papers?query=robotics&limit=3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let papers = body_json(response).await;
    let papers = papers.as_array().unwrap();
    assert_eq!(papers.len(), 3);
    assert!(papers[0]["title"].as_str().unwrap().contains("robotics"));
}

#[tokio::test]
async fn test_paper_search_zero_limit_is_empty() {
    let response = app()
        .oneshot(get("/api/papers?query=anything&limit=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let papers = body_json(response).await;
    assert!(papers.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_requires_paper_ids() {
    let response = app()
        .oneshot(post_json("/api/analyze", json!({"paper_ids": []})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_returns_fixed_shape() {
    let response = app()
        .oneshot(post_json(
            "/api/analyze",
            json!({"paper_ids": ["deadbeef-cafe", "feedface-beef"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let analysis = body_json(response).await;
    assert_eq!(analysis["research_gaps"].as_array().unwrap().len(), 2);
    assert_eq!(analysis["research_directions"].as_array().unwrap().len(), 3);
    assert_eq!(analysis["key_concepts"].as_array().unwrap().len(), 3);
    assert!(analysis["research_gaps"][0]["description"]
        .as_str()
        .unwrap()
        .contains("deadbeef"));
    assert!(analysis["analysis_timestamp"].as_str().is_some());
}
