// src/core/error.rs
use reqwest::StatusCode;

use crate::validation::FieldErrors;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} error: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("{0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Rejected(String),

    #[error("not logged in; run `jobportal login` first")]
    NotAuthenticated,

    #[error("session store error: {0}")]
    Session(String),
}

impl ApiError {
    /// Message to surface to the user.
    ///
    /// Prefers the server's `message` field, then the raw body, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { body, .. } => message_from_body(body)
                .unwrap_or_else(|| fallback.to_string()),
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::Rejected(msg) => msg.clone(),
            ApiError::NotAuthenticated => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("message") {
            Some(serde_json::Value::String(msg)) if !msg.is_empty() => Some(msg.clone()),
            _ => Some(trimmed.to_string()),
        },
        Ok(serde_json::Value::String(msg)) => Some(msg),
        _ => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(body: &str) -> ApiError {
        ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_user_message_prefers_message_field() {
        let err = status_error(r#"{"message":"Email already registered","status":400}"#);
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
    }

    #[test]
    fn test_user_message_uses_plain_body() {
        let err = status_error("You already applied for this job");
        assert_eq!(err.user_message("Failed to apply."), "You already applied for this job");

        let err = status_error(r#"{"error":"bad"}"#);
        assert_eq!(err.user_message("x"), r#"{"error":"bad"}"#);
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = status_error("   ");
        assert_eq!(err.user_message("Failed to load jobs."), "Failed to load jobs.");

        let err = ApiError::Decode {
            url: "http://x".into(),
            reason: "eof".into(),
        };
        assert_eq!(err.user_message("Failed to load jobs."), "Failed to load jobs.");
    }
}
