use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;

use super::{ApiError, non_blank};
use crate::AppContext;
use crate::topics::TopicAnswer;

pub const MISSING_QUESTION: &str = "Missing question parameter";

#[derive(Debug, Deserialize)]
pub struct TopicsBody {
    pub question: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<u32>,
}

/// POST /api/topics
pub async fn suggest_topics(
    State(ctx): State<Arc<AppContext>>,
    body: Option<Json<TopicsBody>>,
) -> Result<Json<TopicAnswer>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::BadRequest(MISSING_QUESTION.to_string()));
    };
    let Some(question) = non_blank(body.question) else {
        return Err(ApiError::BadRequest(MISSING_QUESTION.to_string()));
    };
    let subject = non_blank(body.subject);

    let answer = ctx
        .topics
        .advise(&question, subject.as_deref(), body.grade)
        .await;
    Ok(Json(answer))
}
