//! OpenAI-compatible chat completions client, shared by vision and chat.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::constants::USER_AGENT;

/// Errors returned by a completions provider.
#[derive(Debug)]
pub enum ProviderError {
    /// No API key was configured for this provider.
    MissingApiKey,
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// The provider answered with a non-success status.
    Status {
        /// HTTP status code returned.
        status: u16,
        /// Response body, for the logs.
        body: String,
    },
    /// The response body wasn't the JSON we expected.
    Parse(serde_json::Error),
    /// The response had no message content.
    EmptyResponse,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "Provider API key is not configured"),
            Self::Transport(err) => write!(f, "Provider request failed: {err}"),
            Self::Status { status, body } => {
                write!(f, "Provider returned error {status}: {body}")
            }
            Self::Parse(err) => write!(f, "Failed to parse provider response: {err}"),
            Self::EmptyResponse => write!(f, "Provider response had no content"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Sampling parameters for one completion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampling {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// A message in a completion request.
#[derive(Clone, Debug, Serialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: &'static str,
    /// Plain text or multimodal parts.
    pub content: MessageContent,
}

impl ChatMessage {
    /// A system instruction.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(text.into()),
        }
    }

    /// A plain text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Text(text.into()),
        }
    }

    /// A user message with an instruction and an inline image.
    pub fn user_with_image(text: impl Into<String>, image_url: String) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: image_url },
                },
            ]),
        }
    }
}

/// Message content, either a string or a list of typed parts.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text.
    Text(String),
    /// Multimodal parts.
    Parts(Vec<ContentPart>),
}

/// One part of a multimodal message.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text part.
    Text {
        /// The text.
        text: String,
    },
    /// Image part, usually a `data:` URL.
    ImageUrl {
        /// Where the image lives.
        image_url: ImageUrl,
    },
}

/// Image reference inside a content part.
#[derive(Clone, Debug, Serialize)]
pub struct ImageUrl {
    /// `https:` or `data:` URL.
    pub url: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Handle to one completions provider, cheap to clone and shared across requests.
#[derive(Clone, Debug)]
pub struct ProviderClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

/// Builds the HTTP client shared by every provider. Without a timeout,
/// requests wait as long as the provider does.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ProviderError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ProviderError::Transport)
}

impl ProviderClient {
    /// Builds a client from provider settings.
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        Ok(Self::with_http(http_client(timeout)?, config))
    }

    /// Builds a client around an existing HTTP client.
    pub fn with_http(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// True when an API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model name sent with requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Runs one completion and returns the first choice's text.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: Sampling,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let body = CompletionRequest {
            model: &self.model,
            messages,
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        };

        debug!("Sending completion request to {} ({})", self.endpoint, self.model);
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(ProviderError::Transport)?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).to_string(),
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_slice(&bytes).map_err(ProviderError::Parse)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}
