use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::state::AppState;
use crate::users::{self, NewUser};

const REGISTER_FIELDS_REQUIRED: &str = "Username, email, and password required";
const LOGIN_FIELDS_REQUIRED: &str = "Username and password required";
const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterBody {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Non-blank value, untrimmed so passwords keep their exact bytes
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// Run CPU-heavy password work off the async runtime
async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("password task failed: {e}")))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterBody,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field or duplicate account", body = ErrorBody)
    ),
    tag = "accounts"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(body) = body?;
    let (Some(username), Some(email), Some(password)) = (
        present(body.username).map(trimmed),
        present(body.email).map(trimmed),
        present(body.password),
    ) else {
        return Err(ApiError::BadRequest(REGISTER_FIELDS_REQUIRED.to_string()));
    };

    let password_hash = blocking(move || users::hash_password(&password))
        .await?
        .map_err(|e| ApiError::Internal(format!("{e:#}")))?;

    let user = state
        .users
        .create_user(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(MessageResponse {
        message: format!("User {} registered successfully!", user.username),
    }))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Credentials accepted", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 401, description = "Unknown user or wrong password", body = ErrorBody)
    ),
    tag = "accounts"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(body) = body?;
    let (Some(username), Some(password)) = (present(body.username).map(trimmed), present(body.password))
    else {
        return Err(ApiError::BadRequest(LOGIN_FIELDS_REQUIRED.to_string()));
    };

    let Some(user) = state.users.find_by_username(&username).await? else {
        tracing::info!(username = %username, "Login rejected: unknown user");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let stored_hash = user.password_hash.clone();
    let valid = blocking(move || users::verify_password(&password, &stored_hash)).await?;
    if !valid {
        tracing::info!(username = %username, "Login rejected: wrong password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok(Json(MessageResponse {
        message: format!("User {} logged in successfully!", user.username),
    }))
}
