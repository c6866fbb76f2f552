// SPDX-License-Identifier: MPL-2.0
//! Gemini `generateContent` client.
//!
//! The image travels as base64 inline data next to the instruction text.
//! The first inline image part of the first candidate is the result; when
//! the model answers with text only, that text becomes the failure message.

use super::{RemovalError, RemovalRequest, RemovalResult, RemovedImage, WatermarkRemover};
use crate::config::ProcessingConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";
const USER_AGENT: &str = concat!("WatermarkRemover/", env!("CARGO_PKG_VERSION"));

/// Removal service backed by the Gemini REST API.
#[derive(Clone)]
pub struct GeminiRemover {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiRemover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiRemover")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiRemover {
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            timeout,
        }
    }

    /// Builds a remover from the `[processing]` settings, resolving the key
    /// from the environment first.
    #[must_use]
    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            config.resolve_api_key(),
            config.request_timeout(),
        )
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full URL of the `generateContent` method for the configured model.
    #[must_use]
    pub fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl WatermarkRemover for GeminiRemover {
    fn remove(&self, request: RemovalRequest) -> BoxFuture<'static, RemovalResult<RemovedImage>> {
        let url = self.request_url();
        let api_key = self.api_key.clone();
        let timeout = self.timeout;

        Box::pin(async move {
            let api_key = api_key.ok_or(RemovalError::MissingApiKey)?;
            let body = build_request_body(&request);

            let client = reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .map_err(|e| RemovalError::Transport(e.to_string()))?;

            tracing::debug!(%url, bytes = request.bytes.len(), "sending removal request");

            let response = client
                .post(&url)
                .header(API_KEY_HEADER, api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| map_transport_error(&e, timeout))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| map_transport_error(&e, timeout))?;

            if !status.is_success() {
                return Err(parse_api_error(status.as_u16(), &text));
            }

            let parsed: GenerateContentResponse = serde_json::from_str(&text)
                .map_err(|e| RemovalError::MalformedResponse(e.to_string()))?;
            extract_image(parsed)
        })
    }
}

fn map_transport_error(err: &reqwest::Error, timeout: Duration) -> RemovalError {
    if err.is_timeout() {
        RemovalError::Timeout(timeout)
    } else {
        RemovalError::Transport(err.to_string())
    }
}

// ==========================================================================
// Wire types
// ==========================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn build_request_body(request: &RemovalRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: request.mime_type.clone(),
                        data: STANDARD.encode(request.bytes.as_slice()),
                    }),
                },
                Part {
                    text: Some(request.instruction.clone()),
                    inline_data: None,
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE", "TEXT"],
        },
    }
}

fn parse_api_error(status: u16, body: &str) -> RemovalError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message);
    tracing::warn!(status, ?message, "removal service rejected the request");
    RemovalError::Api { status, message }
}

fn extract_image(response: GenerateContentResponse) -> RemovalResult<RemovedImage> {
    let candidate = response.candidates.into_iter().next();
    let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());
    let parts = candidate
        .and_then(|c| c.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    let mut texts = Vec::new();
    for part in parts {
        if let Some(inline) = part.inline_data {
            let bytes = STANDARD
                .decode(inline.data.as_bytes())
                .map_err(|e| RemovalError::InvalidImageData(e.to_string()))?;
            if bytes.is_empty() {
                return Err(RemovalError::InvalidImageData("empty payload".to_string()));
            }
            return Ok(RemovedImage {
                bytes,
                mime_type: inline.mime_type,
            });
        }
        if let Some(text) = part.text {
            texts.push(text);
        }
    }

    let model_text = if texts.is_empty() {
        response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("The request was blocked ({reason})."))
    } else {
        Some(texts.join("\n"))
    };
    tracing::warn!(?finish_reason, has_text = model_text.is_some(), "model returned no image");
    Err(RemovalError::NoImage { model_text })
}
