//! Axum router configuration with middleware.
//!
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/chatMemory/{chat_id}/{memory_name}",
            get(handlers::memory::get_chat_memories),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::routing::post;
    use copilot_types::chat::{ChatParticipant, ChatSession};
    use copilot_types::config::ServiceConfig;
    use tower::ServiceExt;

    use super::*;

    const TWO_CITATIONS: &str = r#"{"query":"*","noResult":false,"results":[
        {"documentId":"d1","partitions":[{"text":"a"},{"text":"b"}]},
        {"documentId":"d2","partitions":[{"text":"c"}]}]}"#;

    /// Stand-in memory service answering every search with `body`.
    async fn spawn_memory_service(
        status: StatusCode,
        body: &'static str,
    ) -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = Router::new().route(
            "/search",
            post(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), calls)
    }

    async fn test_state(
        memory_endpoint: &str,
        require_participant: bool,
    ) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServiceConfig::default();
        config.memory.endpoint = memory_endpoint.to_string();
        config.memory.timeout_secs = 5;
        config.auth.require_chat_participant = require_participant;

        let state = AppState::init(&config, dir.path()).await.unwrap();
        (state, dir)
    }

    async fn seed_session(state: &AppState) -> ChatSession {
        let session = ChatSession::new("Test chat", "");
        state.sessions.create(&session).await.unwrap();
        session
    }

    async fn get(router: Router, uri: &str, user: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(user) = user {
            request = request.header("x-user-id", user);
        }
        let response = router
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn first_error_message(body: &serde_json::Value) -> &str {
        body["errors"][0]["message"].as_str().unwrap()
    }

    #[tokio::test]
    async fn returns_flattened_memories() {
        let (endpoint, calls) = spawn_memory_service(StatusCode::OK, TWO_CITATIONS).await;
        let (state, _dir) = test_state(&endpoint, false).await;
        let session = seed_session(&state).await;

        let (status, body) = get(
            build_router(state),
            &format!("/chatMemory/{}/LongTermMemory", session.id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["a", "b", "c"]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_session_is_bad_request() {
        let (endpoint, calls) = spawn_memory_service(StatusCode::OK, TWO_CITATIONS).await;
        let (state, _dir) = test_state(&endpoint, false).await;

        let missing = uuid::Uuid::now_v7();

        let (status, body) = get(
            build_router(state),
            &format!("/chatMemory/{missing}/LongTermMemory"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            first_error_message(&body),
            format!("Chat session: {missing} does not exist.")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_guid_chat_id_is_not_found() {
        let (endpoint, calls) = spawn_memory_service(StatusCode::OK, TWO_CITATIONS).await;
        let (state, _dir) = test_state(&endpoint, false).await;

        let (status, body) =
            get(build_router(state), "/chatMemory/no-such-chat/LongTermMemory", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "NOT_FOUND");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn uppercase_guid_resolves_session() {
        let (endpoint, calls) = spawn_memory_service(StatusCode::OK, TWO_CITATIONS).await;
        let (state, _dir) = test_state(&endpoint, false).await;
        let session = seed_session(&state).await;

        let (status, body) = get(
            build_router(state),
            &format!("/chatMemory/{}/LongTermMemory", session.id.to_uppercase()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["a", "b", "c"]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_memory_name_is_bad_request() {
        let (endpoint, calls) = spawn_memory_service(StatusCode::OK, TWO_CITATIONS).await;
        let (state, _dir) = test_state(&endpoint, false).await;
        let session = seed_session(&state).await;

        let (status, body) = get(
            build_router(state),
            &format!("/chatMemory/{}/Gossip", session.id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(first_error_message(&body), "Memory name: Gossip is invalid.");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_index_returns_empty_list() {
        let (endpoint, calls) =
            spawn_memory_service(StatusCode::NOT_FOUND, r#"{"error":"index not found"}"#).await;
        let (state, _dir) = test_state(&endpoint, false).await;
        let session = seed_session(&state).await;

        let (status, body) = get(
            build_router(state),
            &format!("/chatMemory/{}/WorkingMemory", session.id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreachable_memory_service_returns_empty_list() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (state, _dir) = test_state(&format!("http://{addr}"), false).await;
        let session = seed_session(&state).await;

        let (status, body) = get(
            build_router(state),
            &format!("/chatMemory/{}/LongTermMemory", session.id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn participant_check_when_enabled() {
        let (endpoint, _calls) = spawn_memory_service(StatusCode::OK, TWO_CITATIONS).await;
        let (state, _dir) = test_state(&endpoint, true).await;
        let session = seed_session(&state).await;
        state
            .participants
            .create(&ChatParticipant::new("alice", session.id.clone()))
            .await
            .unwrap();

        let uri = format!("/chatMemory/{}/LongTermMemory", session.id);
        let router = build_router(state);

        let (status, _) = get(router.clone(), &uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = get(router.clone(), &uri, Some("mallory")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) =
            get(router.clone(), "/chatMemory/not-a-guid/LongTermMemory", Some("alice")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get(router, &uri, Some("alice")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["a", "b", "c"]));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (state, _dir) = test_state("http://127.0.0.1:9", false).await;
        let (status, body) = get(build_router(state), "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
