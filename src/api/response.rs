// src/api/response.rs
//! Interpretation of Notion API responses.
//!
//! Successful responses are returned as generic JSON. Failures are routed
//! through the error taxonomy so that every non-2xx status ends in exactly
//! one typed [`ApiErrorKind`](crate::ApiErrorKind).

use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, NOT_JSON_ERROR_DETAIL};
use crate::error::NotionError;
use crate::taxonomy::error_registry;
use reqwest::StatusCode;
use serde_json::Value;

/// Pulls `code` and `message` out of a failure body. Fields of the wrong
/// type are ignored on their own so one bad field never drops the other.
fn error_fields(body: &str) -> (Option<String>, String) {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return (None, NOT_JSON_ERROR_DETAIL.to_string());
    };
    let code = value
        .get("code")
        .and_then(Value::as_str)
        .map(str::to_string);
    let detail = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    (code, detail)
}

/// Maps a status and body to the parsed JSON or a typed error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Value, NotionError> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| {
            NotionError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
        });
    }

    let (code, detail) = error_fields(body);

    let error = error_registry()?
        .raise(code.as_deref(), detail)
        .with_status(status.as_u16());

    log::debug!(
        "API error {} ({}): {}",
        status.as_u16(),
        code.as_deref().unwrap_or("no code"),
        error.kind()
    );

    Err(error.into())
}

fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        body.to_string()
    } else {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    }
}
