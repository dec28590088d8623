use axum::{extract::rejection::JsonRejection, extract::State, Json};
use lessonflow_llm::ChatRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::required;
use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::prompts::{self, Assessment};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatBody {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TopicBody {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LessonResponse {
    pub topic: String,
    pub lesson_content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LessonTextBody {
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevisionNotes {
    pub notes: String,
}

/// Single-shot prompt against the configured model
async fn complete(state: &AppState, prompt: String) -> ApiResult<String> {
    let client = state.chat_client()?;
    let request = ChatRequest::prompt(state.config.llm.model.clone(), prompt)
        .with_options(state.config.llm.chat_options());

    let response = client.chat(request).await.map_err(ApiError::Upstream)?;
    let text = response.text().trim();
    if text.is_empty() {
        return Err(ApiError::Upstream(anyhow::anyhow!("model returned an empty reply")));
    }
    Ok(text.to_string())
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatBody,
    responses(
        (status = 200, description = "Model reply", body = ChatReply),
        (status = 400, description = "Message is missing", body = ErrorBody),
        (status = 502, description = "AI service failed", body = ErrorBody)
    ),
    tag = "lessons"
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(body) = body?;
    state.chat_client()?;
    let message = required(body.message, "Message is required")?;

    let reply = complete(&state, message).await?;
    Ok(Json(ChatReply { reply }))
}

#[utoipa::path(
    post,
    path = "/api/generate_lesson",
    request_body = TopicBody,
    responses(
        (status = 200, description = "Generated lesson", body = LessonResponse),
        (status = 400, description = "Topic is missing", body = ErrorBody),
        (status = 502, description = "AI service failed", body = ErrorBody)
    ),
    tag = "lessons"
)]
pub async fn generate_lesson(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TopicBody>, JsonRejection>,
) -> ApiResult<Json<LessonResponse>> {
    let Json(body) = body?;
    state.chat_client()?;
    let topic = required(body.topic, "Topic is required")?;

    let lesson_content = complete(&state, prompts::lesson_prompt(&topic)).await?;
    tracing::info!(topic = %topic, chars = lesson_content.len(), "Lesson generated");

    Ok(Json(LessonResponse { topic, lesson_content }))
}

#[utoipa::path(
    post,
    path = "/api/revision_notes",
    request_body = LessonTextBody,
    responses(
        (status = 200, description = "Bullet-point notes", body = RevisionNotes),
        (status = 400, description = "Lesson content is missing", body = ErrorBody),
        (status = 502, description = "AI service failed", body = ErrorBody)
    ),
    tag = "lessons"
)]
pub async fn revision_notes(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LessonTextBody>, JsonRejection>,
) -> ApiResult<Json<RevisionNotes>> {
    let Json(body) = body?;
    state.chat_client()?;
    let text = required(body.text, "Lesson content is required")?;

    let notes = complete(&state, prompts::revision_notes_prompt(&text)).await?;
    Ok(Json(RevisionNotes { notes }))
}

#[utoipa::path(
    post,
    path = "/api/generate_assessment",
    request_body = LessonTextBody,
    responses(
        (status = 200, description = "Multiple-choice assessment", body = Assessment),
        (status = 400, description = "Lesson content is missing", body = ErrorBody),
        (status = 502, description = "AI service failed or returned malformed JSON", body = ErrorBody)
    ),
    tag = "lessons"
)]
pub async fn generate_assessment(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LessonTextBody>, JsonRejection>,
) -> ApiResult<Json<Assessment>> {
    let Json(body) = body?;
    state.chat_client()?;
    let text = required(body.text, "Lesson content is required")?;

    let raw = complete(&state, prompts::assessment_prompt(&text)).await?;
    let assessment = prompts::parse_assessment(&raw).map_err(ApiError::Upstream)?;

    Ok(Json(assessment))
}
