pub mod auth;
pub mod flow;
pub mod health;
pub mod lessons;
pub mod stream;

use crate::error::{ApiError, ApiResult};

/// Trimmed value of a required text field, or a 400 with `message`
pub(crate) fn required(value: Option<String>, message: &str) -> ApiResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(message.to_string())),
    }
}
