//! HTTP request handlers

use super::state::AppState;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

/// Execute a GraphQL request
pub async fn graphql(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// Interactive GraphiQL console
pub async fn graphiql(State(state): State<AppState>) -> Response {
    if !state.graphiql_enabled() {
        return StatusCode::NOT_FOUND.into_response();
    }

    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.backend.health().await {
        Ok(engine) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "version": crate::VERSION,
                "engine": engine.status,
            })),
        ),
        Err(e) => {
            tracing::warn!("Search engine health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "ok",
                    "version": crate::VERSION,
                    "engine": "unavailable",
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::testing::StaticBackend;
    use crate::backend::Meilisearch;
    use crate::config::Settings;
    use crate::network::HttpClient;
    use crate::web::{create_router, AppState};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router(settings: Settings, backend: StaticBackend) -> Router {
        create_router(AppState::new(settings, Arc::new(backend)))
    }

    async fn post_graphql(app: Router, query: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_graphql_endpoint() {
        let app = router(Settings::default(), StaticBackend::movies());

        let (status, body) = post_graphql(app, r#"{ search(q: "amélie") { nbHits } }"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["search"]["nbHits"], 1);
    }

    #[tokio::test]
    async fn test_graphiql_console() {
        let app = router(Settings::default(), StaticBackend::movies());

        let response = app
            .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("graphiql"));
    }

    #[tokio::test]
    async fn test_graphiql_disabled() {
        let mut settings = Settings::default();
        settings.server.graphiql = false;
        let app = router(settings, StaticBackend::movies());

        let response = app
            .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_reports_engine() {
        let app = router(Settings::default(), StaticBackend::movies());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["engine"], "available");
    }

    #[tokio::test]
    async fn test_health_engine_down() {
        let app = router(Settings::default(), StaticBackend::unavailable());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["engine"], "unavailable");
        assert_eq!(body["version"], crate::VERSION);
    }

    #[tokio::test]
    async fn test_end_to_end_against_engine() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/movies/search"))
            .and(body_json(json!({
                "q": "matrix",
                "offset": 0,
                "limit": 1,
                "attributesToRetrieve": ["*"],
                "cropLength": 200,
                "matches": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [{"id": "603", "title": "The Matrix", "genres": ["Action"]}],
                "offset": 0,
                "limit": 1,
                "nbHits": 3,
                "exhaustiveNbHits": false,
                "processingTimeMs": 1,
                "query": "matrix"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut settings = Settings::default();
        settings.meilisearch.host = server.uri();
        let client = HttpClient::new(&settings.meilisearch).unwrap();
        let backend = Meilisearch::with_settings(client, &settings.meilisearch);
        let app = create_router(AppState::new(settings, Arc::new(backend)));

        let (status, body) = post_graphql(
            app,
            r#"{ search(q: "matrix", limit: 1) { query nbHits exhaustiveNbHits hits } }"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let search = &body["data"]["search"];
        assert_eq!(search["query"], "matrix");
        assert_eq!(search["nbHits"], 3);
        assert_eq!(search["exhaustiveNbHits"], false);
        assert_eq!(search["hits"], json!([{"id": "603", "title": "The Matrix", "genres": ["Action"]}]));
    }
}
