//! Error types shared by the storage, session and API layers.
//!
//! Views never propagate these further: they turn them into a display string
//! with [`ApiError::user_message`] and keep it in local state.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("browser storage is not available")]
    Unavailable,

    #[error("failed to write `{key}` to browser storage")]
    Write { key: String },

    #[error("failed to remove `{key}` from browser storage")]
    Remove { key: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Api { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    /// The authorization step failed, so the request was not sent.
    #[error("could not authorize request: {0}")]
    Authorization(#[from] StorageError),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Builds an [`ApiError::Api`] from a failed response body, keeping the
    /// structured `error` field when the body has one.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.trim().is_empty());
        ApiError::Api { status, message }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    fn transport_detail(&self) -> Option<String> {
        match self {
            ApiError::Api { message: None, status } => {
                Some(format!("request failed with status code {status}"))
            }
            ApiError::Api { .. } => None,
            ApiError::Transport(detail) | ApiError::Decode(detail) => Some(detail.clone()),
            ApiError::Authorization(source) => Some(source.to_string()),
        }
    }

    /// Text shown to the user: the server's message verbatim, else the
    /// transport message behind a generic prefix, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self.transport_detail() {
            Some(detail) if !detail.trim().is_empty() => format!("Request failed: {detail}"),
            _ => fallback.to_string(),
        }
    }
}
