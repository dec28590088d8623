use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::Config;
use crate::handlers::{auth, flow, health, lessons, stream};
use crate::middleware::logging;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "Lessonflow API", description = "AI-assisted lessons, revision notes and assessments"),
    paths(
        health::health_check,
        auth::register,
        auth::login,
        lessons::chat,
        lessons::generate_lesson,
        lessons::revision_notes,
        lessons::generate_assessment,
        flow::lesson_flow,
        stream::lesson_flow_stream,
    ),
    components(schemas(
        health::HealthResponse,
        health::ServiceStatus,
        auth::RegisterBody,
        auth::LoginBody,
        auth::MessageResponse,
        lessons::ChatBody,
        lessons::ChatReply,
        lessons::TopicBody,
        lessons::LessonResponse,
        lessons::LessonTextBody,
        lessons::RevisionNotes,
        crate::prompts::Assessment,
        crate::prompts::Question,
        flow::LessonFlowResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "accounts", description = "Registration and login"),
        (name = "lessons", description = "Single-shot AI study aids"),
        (name = "lesson_flow", description = "Generate, quiz and retry loop")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/chat", post(lessons::chat))
        .route("/generate_lesson", post(lessons::generate_lesson))
        .route("/revision_notes", post(lessons::revision_notes))
        .route("/generate_assessment", post(lessons::generate_assessment))
        .route("/lesson_flow", post(flow::lesson_flow))
        .route("/lesson_flow/stream", post(stream::lesson_flow_stream))
        .route("/openapi.json", get(openapi_json));

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if !config.cors.enabled {
        return CorsLayer::new();
    }

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.cors.origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
