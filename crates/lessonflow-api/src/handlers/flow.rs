use axum::{extract::rejection::JsonRejection, extract::State, Json};
use lessonflow_graph::LessonState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::lessons::TopicBody;
use super::required;
use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LessonFlowResponse {
    pub topic: String,
    pub lesson_content: String,
    pub quiz_score: f64,
    /// `completed` or `max_iterations_exceeded`
    pub status: String,
    pub iterations: usize,
    pub run_id: String,
}

/// Run the lesson flow to completion and return the final state
#[utoipa::path(
    post,
    path = "/api/lesson_flow",
    request_body = TopicBody,
    responses(
        (status = 200, description = "Final lesson state", body = LessonFlowResponse),
        (status = 400, description = "Topic is missing", body = ErrorBody),
        (status = 502, description = "Generator or scorer failed", body = ErrorBody),
        (status = 504, description = "Run exceeded the execution timeout", body = ErrorBody)
    ),
    tag = "lesson_flow"
)]
pub async fn lesson_flow(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TopicBody>, JsonRejection>,
) -> ApiResult<Json<LessonFlowResponse>> {
    let Json(body) = body?;
    let topic = required(body.topic, "Topic is required")?;

    let outcome = state.graph.run(LessonState::new(topic.clone())).await?;

    Ok(Json(LessonFlowResponse {
        topic,
        lesson_content: outcome.state.lesson_content().to_string(),
        quiz_score: outcome.state.quiz_score(),
        status: outcome.status.to_string(),
        iterations: outcome.iterations,
        run_id: outcome.run_id,
    }))
}
