//! Normalizes uploaded drawings into RGB PNGs for the vision provider.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::AirDrawError;

/// An uploaded image re-encoded as a 3-channel PNG.
#[derive(Clone, Debug)]
pub struct NormalizedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl NormalizedImage {
    /// PNG-encoded bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Width in pixels, unchanged from the upload.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, unchanged from the upload.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Renders the image as a `data:` URL for inline transmission.
    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Decodes any supported image and re-encodes it as an RGB PNG.
pub fn normalize(bytes: &[u8]) -> Result<NormalizedImage, AirDrawError> {
    if bytes.is_empty() {
        debug!("Image is empty");
        return Err(AirDrawError::Decode("empty image".to_string()));
    }

    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| {
            debug!("Failed to guess image format: {}", err);
            AirDrawError::Decode(err.to_string())
        })?;
    let format = reader.format();
    let decoded = reader.decode().map_err(|err| {
        debug!("Failed to decode image: {}", err);
        AirDrawError::from(err)
    })?;
    debug!(
        "Decoded {:?} image {}x{} ({:?})",
        format,
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut png = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|err| AirDrawError::InternalServerError(err.to_string()))?;

    Ok(NormalizedImage {
        png,
        width: rgb.width(),
        height: rgb.height(),
    })
}
