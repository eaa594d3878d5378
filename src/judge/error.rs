//! Failure classification for submission and status polling.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JudgeError {
    /// HTTP 429 from the execution service; the shared quota is exhausted.
    #[error("execution quota exceeded")]
    RateLimited,

    /// Any other non-2xx response, with the server message when one was sent.
    #[error("service error {status}")]
    Service { status: u16, message: Option<String> },

    /// The request never reached a server (connect failure, timeout, broken
    /// transport mid-body).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request could not be built, or a 2xx response body was not in the
    /// expected shape.
    #[error("request failed: {0}")]
    Client(String),

    /// A failure during status polling. Terminal: the loop never re-polls
    /// after a transport error.
    #[error("status polling failed")]
    Poll(#[source] Box<JudgeError>),
}

impl JudgeError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_request() {
            JudgeError::Client(err.to_string())
        } else {
            JudgeError::Network(err)
        }
    }

    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return JudgeError::RateLimited;
        }
        let body = response.text().await.unwrap_or_default();
        JudgeError::Service {
            status: status.as_u16(),
            message: extract_message(&body),
        }
    }
}

/// Pull a human-readable message out of an error body: a JSON `message` or
/// `error` field when present, else the raw body when non-empty.
fn extract_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_message_field() {
        let body = r#"{"message":"wrong language id"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("wrong language id"));
    }

    #[test]
    fn extracts_json_error_field() {
        let body = r#"{"error":"submission rejected"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("submission rejected"));
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(extract_message("plain text\n").as_deref(), Some("plain text"));
    }

    #[test]
    fn empty_body_yields_none() {
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message("   "), None);
    }
}
