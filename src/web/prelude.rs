pub(crate) use super::AppState;
pub(crate) use super::upload::UploadedImage;
pub(crate) use crate::error::AirDrawError;
pub(crate) use crate::pipeline::ResponseStatus;
pub(crate) use axum::Json;
pub(crate) use axum::extract::State;
pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use tracing::{debug, info};
