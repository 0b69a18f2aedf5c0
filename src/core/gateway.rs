//! Remote text generation.
//!
//! A [`ResponseGateway`] turns the whole conversation into one generated
//! reply. Every call resends the full history; nothing is kept server side.
//! [`request_reply`] folds failures into a substitute [`Reply`] so callers
//! never see a raw error.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::{generate_content_url, GenerateContentRequest, GenerateContentResponse};
use crate::core::config::data::Config;
use crate::core::constants::{FALLBACK_CONNECTION, FALLBACK_UNSURE};
use crate::core::emotion::MoodTag;
use crate::core::message::Turn;

#[derive(Debug)]
pub enum GatewayError {
    /// No API key was configured.
    MissingCredential,
    /// The request never produced a response.
    Request(String),
    /// The server answered with a non-success status.
    Status { status: u16, body: String },
    /// The body was not the expected JSON document.
    Decode(String),
    /// The response parsed but held no generated text.
    MissingText,
}

impl GatewayError {
    /// Soft failures are answered with "unsure" instead of "trouble connecting".
    pub fn is_soft(&self) -> bool {
        matches!(self, GatewayError::MissingText)
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::MissingCredential => write!(f, "no API key configured"),
            GatewayError::Request(message) => write!(f, "request failed: {message}"),
            GatewayError::Status { status, body } => {
                write!(f, "API error {status}: {}", body.trim())
            }
            GatewayError::Decode(message) => write!(f, "invalid response body: {message}"),
            GatewayError::MissingText => write!(f, "response contained no generated text"),
        }
    }
}

impl StdError for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Request(err.to_string())
        }
    }
}

#[async_trait]
pub trait ResponseGateway: Send + Sync {
    async fn generate(&self, history: &[Turn]) -> Result<String, GatewayError>;
}

/// Gateway for the Gemini `generateContent` endpoint.
pub struct GeminiGateway {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    system_prompt: String,
}

impl GeminiGateway {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: generate_content_url(base_url, model),
            api_key,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn from_config(config: &Config, model: &str, api_key: Option<String>) -> Self {
        Self::new(
            reqwest::Client::new(),
            config.base_url(),
            model,
            api_key,
            config.system_prompt(),
        )
    }
}

#[async_trait]
impl ResponseGateway for GeminiGateway {
    async fn generate(&self, history: &[Turn]) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;
        let request = GenerateContentRequest::new(history, &self.system_prompt);

        debug!(url = %self.url, turns = history.len(), "sending generateContent request");
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|err| GatewayError::Decode(err.to_string()))?;
        parsed
            .first_text()
            .map(str::to_owned)
            .ok_or(GatewayError::MissingText)
    }
}

/// Text to show for a finished request, plus the mood a failure asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub mood: Option<MoodTag>,
}

impl Reply {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mood: None,
        }
    }

    pub fn from_result(result: Result<String, GatewayError>) -> Self {
        match result {
            Ok(text) => Self::generated(text),
            Err(err) if err.is_soft() => Self {
                text: FALLBACK_UNSURE.to_string(),
                mood: Some(MoodTag::Confused),
            },
            Err(_) => Self {
                text: FALLBACK_CONNECTION.to_string(),
                mood: Some(MoodTag::Sad),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.mood.is_some()
    }
}

/// Run one request and absorb any failure into a substitute reply.
pub async fn request_reply(gateway: &dyn ResponseGateway, history: &[Turn]) -> Reply {
    let result = gateway.generate(history).await;
    if let Err(err) = &result {
        warn!(error = %err, soft = err.is_soft(), "generation request failed");
    }
    Reply::from_result(result)
}
