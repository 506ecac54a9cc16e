/// HTTP client for the hosted text-to-image endpoint
///
/// One request per prompt: `POST {endpoint}` with `{"inputs": prompt}`; the
/// response body is the encoded image.

use image::DynamicImage;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::error::GenerateError;
use crate::state::prompt::Prompt;

/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct TextToImageRequest<'a> {
    inputs: &'a str,
}

/// Error body returned by the service, e.g.
/// `{"error": "Model is currently loading", "estimated_time": 20.0}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ErrorText,
    #[serde(default)]
    estimated_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorText {
    One(String),
    Many(Vec<String>),
}

impl InferenceClient {
    pub fn new(config: &Config) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GenerateError::Client(Arc::new(e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            token: config.api_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, prompt: &Prompt) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "image/png")
            .json(&TextToImageRequest {
                inputs: prompt.as_str(),
            });

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send `prompt` to the service and decode the returned image.
    pub async fn text_to_image(&self, prompt: &Prompt) -> Result<DynamicImage, GenerateError> {
        tracing::debug!(endpoint = %self.endpoint, "sending text-to-image request");

        let response = self.request(prompt).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &body);
            tracing::warn!(status = status.as_u16(), %message, "inference API returned an error");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(bytes = bytes.len(), "received image");

        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Pull a human-readable message out of an error response.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        let text = match parsed.error {
            ErrorText::One(text) => text,
            ErrorText::Many(texts) => texts.join("; "),
        };
        return match parsed.estimated_time {
            Some(secs) => format!("{text}, ready in about {secs:.0}s"),
            None => text,
        };
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unexpected response")
        .to_string()
}
