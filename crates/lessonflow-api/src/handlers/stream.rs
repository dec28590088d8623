use axum::{
    extract::{rejection::JsonRejection, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{Stream, StreamExt};
use lessonflow_graph::{FlowEvent, LessonState};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;

use super::lessons::TopicBody;
use super::required;
use crate::error::ApiResult;
use crate::state::AppState;

/// Run the lesson flow and stream its progress using Server-Sent Events
///
/// Each SSE event is named after the `FlowEvent` type and carries the event
/// as JSON. The stream ends after `end_stream` or `error`.
#[utoipa::path(
    post,
    path = "/api/lesson_flow/stream",
    request_body = TopicBody,
    responses(
        (status = 200, description = "Streaming lesson flow events", content_type = "text/event-stream"),
        (status = 400, description = "Topic is missing")
    ),
    tag = "lesson_flow"
)]
pub async fn lesson_flow_stream(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TopicBody>, JsonRejection>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let Json(body) = body?;
    let topic = required(body.topic, "Topic is required")?;

    tracing::info!(topic = %topic, "Streaming lesson flow");

    let events = state.graph.spawn_run(LessonState::new(topic));
    let stream = ReceiverStream::new(events).map(|event| Ok::<_, Infallible>(to_sse(&event)));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn to_sse(event: &FlowEvent) -> Event {
    Event::default()
        .event(event.name())
        .json_data(event)
        .unwrap_or_else(|e| {
            tracing::error!("Failed to serialize flow event: {}", e);
            Event::default()
                .event("error")
                .data(r#"{"type":"error","message":"serialization failed"}"#)
        })
}
