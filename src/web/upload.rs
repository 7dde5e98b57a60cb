use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};

use super::prelude::*;
use crate::constants::IMAGE_FIELD;

/// The `image` field of a multipart upload.
#[derive(Clone, Debug)]
pub(crate) struct UploadedImage {
    pub(crate) bytes: Bytes,
    pub(crate) content_type: Option<String>,
}

impl<S> FromRequest<S> for UploadedImage
where
    S: Send + Sync,
{
    type Rejection = AirDrawError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;

        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(IMAGE_FIELD) {
                continue;
            }
            let content_type = field.content_type().map(str::to_string);
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;
            if bytes.is_empty() {
                return Err(AirDrawError::BadRequest("image upload is empty".to_string()));
            }
            debug!(
                "Received upload {:?} ({:?}, {} bytes)",
                file_name,
                content_type,
                bytes.len()
            );
            return Ok(Self {
                bytes,
                content_type,
            });
        }

        Err(AirDrawError::BadRequest(format!("missing `{IMAGE_FIELD}` field")))
    }
}
