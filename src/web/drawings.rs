use super::prelude::*;
use crate::constants::{GHOST_GUIDE_MESSAGE, GHOST_GUIDE_UNAVAILABLE_MESSAGE, SAVE_MESSAGE};
use crate::imaging;
use crate::pipeline::{self, DrawingOutcome, DrawingPipeline};

#[derive(Debug, Serialize)]
pub(crate) struct DrawingResponse {
    description: String,
    image_url: String,
    status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl From<DrawingOutcome> for DrawingResponse {
    fn from(outcome: DrawingOutcome) -> Self {
        Self {
            description: outcome.description,
            image_url: outcome.image_url,
            status: outcome.status,
            message: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveResponse {
    status: ResponseStatus,
    filename: String,
    path: String,
    message: &'static str,
}

async fn run_pipeline(
    state: &AppState,
    upload: &UploadedImage,
    pipeline: &DrawingPipeline,
) -> Result<DrawingOutcome, AirDrawError> {
    let image = imaging::normalize(&upload.bytes)?;
    debug!(
        "Normalized {:?} upload to {}x{} PNG",
        upload.content_type,
        image.width(),
        image.height()
    );
    pipeline
        .run(&state.vision, &image, &state.illustration_base)
        .await
}

/// handles POST /analyze-drawing
pub(crate) async fn analyze_drawing_handler(
    State(state): State<AppState>,
    upload: UploadedImage,
) -> Result<Json<DrawingResponse>, AirDrawError> {
    let outcome = run_pipeline(&state, &upload, &pipeline::ANALYZE).await?;
    info!("Analyzed drawing as {:?}", outcome.description);
    Ok(Json(outcome.into()))
}

/// handles POST /finish-drawing
pub(crate) async fn finish_drawing_handler(
    State(state): State<AppState>,
    upload: UploadedImage,
) -> Result<Json<DrawingResponse>, AirDrawError> {
    let outcome = run_pipeline(&state, &upload, &pipeline::FINISH).await?;
    info!("Finished drawing as {:?}", outcome.description);
    Ok(Json(outcome.into()))
}

/// handles POST /ghost-guide
pub(crate) async fn ghost_guide_handler(
    State(state): State<AppState>,
    upload: UploadedImage,
) -> Result<Json<DrawingResponse>, AirDrawError> {
    let outcome = run_pipeline(&state, &upload, &pipeline::GHOST_GUIDE).await?;
    let message = match outcome.status {
        ResponseStatus::Success => GHOST_GUIDE_MESSAGE,
        ResponseStatus::Error => GHOST_GUIDE_UNAVAILABLE_MESSAGE,
    };
    Ok(Json(DrawingResponse {
        message: Some(message),
        ..DrawingResponse::from(outcome)
    }))
}

/// handles POST /save-drawing
pub(crate) async fn save_drawing_handler(
    State(state): State<AppState>,
    upload: UploadedImage,
) -> Result<Json<SaveResponse>, AirDrawError> {
    let saved = state.store.save(&upload.bytes).await?;
    Ok(Json(SaveResponse {
        status: ResponseStatus::Success,
        filename: saved.filename,
        path: saved.public_path,
        message: SAVE_MESSAGE,
    }))
}
