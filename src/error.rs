//! Error handling

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;

use crate::provider::ProviderError;

/// Errors for the airdraw application.
#[derive(Debug)]
pub enum AirDrawError {
    /// When the client didn't send what we need
    BadRequest(String),
    /// Upload is bigger than the body limit
    PayloadTooLarge(String),
    /// Uploaded bytes aren't an image we can decode
    Decode(String),
    /// An upstream provider failed and there's no safe default
    Provider(ProviderError),
    /// Startup configuration is missing or invalid
    Config(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl std::fmt::Display for AirDrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "Bad request: {message}"),
            Self::PayloadTooLarge(message) => write!(f, "Payload too large: {message}"),
            Self::Decode(message) => write!(f, "Failed to decode image: {message}"),
            Self::Provider(err) => write!(f, "{err}"),
            Self::Config(message) => write!(f, "Configuration error: {message}"),
            Self::InternalServerError(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AirDrawError {}

impl From<std::io::Error> for AirDrawError {
    fn from(err: std::io::Error) -> Self {
        AirDrawError::InternalServerError(err.to_string())
    }
}

impl From<image::ImageError> for AirDrawError {
    fn from(err: image::ImageError) -> Self {
        AirDrawError::Decode(err.to_string())
    }
}

impl From<MultipartError> for AirDrawError {
    fn from(err: MultipartError) -> Self {
        client_error(err.status(), err.body_text())
    }
}

impl From<MultipartRejection> for AirDrawError {
    fn from(err: MultipartRejection) -> Self {
        client_error(err.status(), err.body_text())
    }
}

impl From<FormRejection> for AirDrawError {
    fn from(err: FormRejection) -> Self {
        client_error(err.status(), err.body_text())
    }
}

/// Anything the client sent wrong is a 400, except an oversized body.
fn client_error(status: StatusCode, message: String) -> AirDrawError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AirDrawError::PayloadTooLarge(message)
    } else {
        AirDrawError::BadRequest(message)
    }
}

impl From<url::ParseError> for AirDrawError {
    fn from(err: url::ParseError) -> Self {
        AirDrawError::Config(err.to_string())
    }
}

impl From<ProviderError> for AirDrawError {
    fn from(err: ProviderError) -> Self {
        AirDrawError::Provider(err)
    }
}

impl IntoResponse for AirDrawError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AirDrawError::BadRequest(message) => {
                info!("Bad request received: {}", message);
                StatusCode::BAD_REQUEST
            }
            AirDrawError::PayloadTooLarge(message) => {
                info!("Oversized request received: {}", message);
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AirDrawError::Decode(message) => {
                tracing::error!("Image decode error: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AirDrawError::Provider(err) => {
                tracing::error!("Provider error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AirDrawError::Config(message) | AirDrawError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
