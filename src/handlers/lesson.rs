use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{Json, extract::State};
use futures::FutureExt;
use serde::Deserialize;

use super::{ApiError, non_blank, panic_message};
use crate::AppContext;
use crate::models::{LessonRequest, LessonResult};

pub const MISSING_QUERY: &str = "Missing query parameter";

#[derive(Debug, Deserialize)]
pub struct LessonBody {
    pub query: Option<String>,
    pub subject: Option<String>,
    pub language: Option<String>,
}

/// POST /api/lesson
///
/// ```bash
/// curl -X POST http://127.0.0.1:5001/api/lesson \
///   -H 'content-type: application/json' \
///   -d '{"query":"What are polynomials?","subject":"Math","language":"English"}'
/// ```
pub async fn generate_lesson(
    State(ctx): State<Arc<AppContext>>,
    body: Option<Json<LessonBody>>,
) -> Result<Json<LessonResult>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::BadRequest(MISSING_QUERY.to_string()));
    };
    let Some(query) = non_blank(body.query) else {
        return Err(ApiError::BadRequest(MISSING_QUERY.to_string()));
    };

    let req = LessonRequest::new(query, non_blank(body.subject), non_blank(body.language));

    // The orchestrator answers every provider failure itself; only a panic lands here.
    match AssertUnwindSafe(ctx.orchestrator.lesson(&req))
        .catch_unwind()
        .await
    {
        Ok(result) => Ok(Json(result)),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!("Lesson pipeline panicked: {}", message);
            Err(ApiError::Internal(message))
        }
    }
}
