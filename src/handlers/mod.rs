/// HTTP route layer for the lesson API
pub mod lesson;
pub mod topics;

#[cfg(test)]
mod test_handlers;

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::AppContext;

/// Errors surfaced to HTTP callers as `{"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    let static_dir = ctx.config.server.static_dir.clone();

    let mut router = Router::new()
        .route("/api/lesson", post(lesson::generate_lesson))
        .route("/api/topics", post(topics::suggest_topics))
        .route("/health", get(|| async { "ok" }))
        .with_state(ctx);

    if Path::new(&static_dir).is_dir() {
        tracing::info!("Serving frontend from {}", static_dir);
        router = router.fallback_service(ServeDir::new(static_dir));
    } else {
        tracing::warn!("Frontend directory {} not found - API only", static_dir);
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Treat null and whitespace-only strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "Lesson generation panicked".to_string()
    }
}
