// SPDX-License-Identifier: MPL-2.0
//! Remote watermark removal.
//!
//! The actual inpainting happens in an external generative-image service.
//! This module defines the seam the session talks to ([`WatermarkRemover`])
//! and the production implementation backed by the Gemini REST API
//! ([`gemini::GeminiRemover`]).

pub mod gemini;

pub use gemini::GeminiRemover;

use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for removal operations.
pub type RemovalResult<T> = Result<T, RemovalError>;

/// Input handed to the removal service.
#[derive(Clone)]
pub struct RemovalRequest {
    /// Encoded image exactly as the user selected it.
    pub bytes: Arc<Vec<u8>>,
    /// MIME type declared for `bytes`.
    pub mime_type: String,
    /// Free-text instruction for the model.
    pub instruction: String,
}

impl fmt::Debug for RemovalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovalRequest")
            .field("bytes", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("instruction", &self.instruction)
            .finish()
    }
}

/// Encoded image returned by the service.
#[derive(Clone, PartialEq, Eq)]
pub struct RemovedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl fmt::Debug for RemovedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovedImage")
            .field("bytes", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Errors that can occur while talking to the removal service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemovalError {
    /// No API key in the environment or the settings file.
    #[error("No API key configured. Set GEMINI_API_KEY or add api_key to the [processing] section of settings.toml.")]
    MissingApiKey,
    /// Connection, TLS or body transfer failure.
    #[error("{0}")]
    Transport(String),
    /// The service did not answer in time.
    #[error("The removal service did not answer within {} seconds.", .0.as_secs())]
    Timeout(Duration),
    /// Non-success HTTP status.
    #[error("HTTP status {status}")]
    Api { status: u16, message: Option<String> },
    /// The response body did not match the expected schema.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The model answered without an image (refusal, safety block...).
    #[error("The model returned no image")]
    NoImage { model_text: Option<String> },
    /// The inline image payload could not be decoded.
    #[error("Invalid image data: {0}")]
    InvalidImageData(String),
}

impl RemovalError {
    /// Text to show the user, or `None` when the failure carries nothing
    /// meaningful and a generic message should be used instead.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        let message = match self {
            RemovalError::MissingApiKey
            | RemovalError::Transport(_)
            | RemovalError::Timeout(_) => Some(self.to_string()),
            RemovalError::Api { message, .. } => message.clone(),
            RemovalError::NoImage { model_text } => model_text.clone(),
            RemovalError::MalformedResponse(_) | RemovalError::InvalidImageData(_) => None,
        };
        message
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

/// The external collaborator that turns an image into a cleaned image.
///
/// Implementations must be cheap to call from the UI thread: all work
/// happens inside the returned future.
pub trait WatermarkRemover: Send + Sync {
    fn remove(&self, request: RemovalRequest) -> BoxFuture<'static, RemovalResult<RemovedImage>>;
}

/// Shared handle used by the application shell.
pub type SharedRemover = Arc<dyn WatermarkRemover>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_surfaces_service_message() {
        let err = RemovalError::Api {
            status: 429,
            message: Some("quota exceeded".to_string()),
        };
        assert_eq!(err.user_message().as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn api_error_without_message_has_no_user_message() {
        let err = RemovalError::Api {
            status: 500,
            message: None,
        };
        assert!(err.user_message().is_none());
    }

    #[test]
    fn blank_messages_count_as_missing() {
        let err = RemovalError::NoImage {
            model_text: Some("   ".to_string()),
        };
        assert!(err.user_message().is_none());
    }

    #[test]
    fn refusal_text_is_surfaced() {
        let err = RemovalError::NoImage {
            model_text: Some("I can't edit this image.".to_string()),
        };
        assert_eq!(err.user_message().as_deref(), Some("I can't edit this image."));
    }

    #[test]
    fn malformed_response_uses_generic_message() {
        let err = RemovalError::MalformedResponse("missing field".to_string());
        assert!(err.user_message().is_none());
    }

    #[test]
    fn timeout_message_mentions_duration() {
        let err = RemovalError::Timeout(Duration::from_secs(120));
        assert!(err.user_message().unwrap().contains("120"));
    }

    #[test]
    fn request_debug_hides_payload() {
        let request = RemovalRequest {
            bytes: Arc::new(vec![0u8; 2048]),
            mime_type: "image/png".to_string(),
            instruction: "clean".to_string(),
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("2048"));
        assert!(!debug.contains("0, 0, 0"));
    }
}
