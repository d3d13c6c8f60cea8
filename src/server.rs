//! HTTP routes: the graph query, a liveness probe and the static page.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use gitway_core::SharedMirror;
use graph::{GitHistory, GraphBuilder, TimeWindow};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub mirror: SharedMirror,
}

impl AppState {
    pub fn new(mirror: SharedMirror) -> Self {
        Self { mirror }
    }
}

/// Create the router. Requests that match no route are served from
/// `static_dir` when one is given.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/graph", get(get_graph))
        .route("/health", get(health));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// First value given for `key`
fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

async fn get_graph(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let start = Instant::now();
    let window = TimeWindow::from_query(first(&params, "before"), first(&params, "after"), Utc::now());

    let mirror = state.mirror.clone();
    let built = tokio::task::spawn_blocking(move || {
        mirror.read(|repo| GraphBuilder::new(GitHistory::new(repo)).build(window))
    })
    .await;

    match built {
        Ok(Ok(graph)) => {
            debug!(
                "Served graph [{}, {}] with {} nodes, {} links in {:?}",
                window.after,
                window.before,
                graph.node_count(),
                graph.link_count(),
                start.elapsed()
            );
            Json(graph).into_response()
        }
        Ok(Err(err)) => internal_error(format!("{:#}", err)),
        Err(err) => internal_error(format!("graph build task failed: {}", err)),
    }
}

fn internal_error(message: String) -> Response {
    error!("Graph request failed: {}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}
