//! Axum router configuration with middleware.
//!
//! Middleware: CORS, request tracing.
//!
//! A static web client is served from `PARLEY_WEB_DIR` (default `web/`)
//! when that directory exists. API routes and `/health` take priority;
//! unknown paths fall through to the client's `index.html`. Without the
//! directory, only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let web_dir = std::env::var("PARLEY_WEB_DIR").unwrap_or_else(|_| "web".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "static web client serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
