use super::prelude::*;
use crate::constants::SCREEN_UNAVAILABLE_MESSAGE;
use crate::provider::Sampling;
use crate::{chat, imaging, vision};
use axum::extract::{Form, FromRequest, Query, Request};

const SCREEN_SAMPLING: Sampling = Sampling {
    temperature: 0.5,
    max_tokens: 150,
};

#[derive(Deserialize)]
struct VoiceChatParams {
    text: String,
}

/// The voice chat message, from `?text=` or a urlencoded form body.
pub(crate) struct ChatText(String);

impl<S> FromRequest<S> for ChatText
where
    S: Send + Sync,
{
    type Rejection = AirDrawError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Query(params)) = Query::<VoiceChatParams>::try_from_uri(req.uri()) {
            return Ok(Self(params.text));
        }
        let Form(params) = Form::<VoiceChatParams>::from_request(req, state).await?;
        Ok(Self(params.text))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssistantResponse {
    status: ResponseStatus,
    response: String,
}

/// handles POST /voice-chat
pub(crate) async fn voice_chat_handler(
    State(state): State<AppState>,
    ChatText(text): ChatText,
) -> Result<Json<AssistantResponse>, AirDrawError> {
    if text.trim().is_empty() {
        return Err(AirDrawError::BadRequest("text is empty".to_string()));
    }
    let response = chat::reply(&state.chat, &text).await?;
    debug!("Chat reply: {:?}", response);
    Ok(Json(AssistantResponse {
        status: ResponseStatus::Success,
        response,
    }))
}

/// handles POST /analyze-screen
pub(crate) async fn analyze_screen_handler(
    State(state): State<AppState>,
    upload: UploadedImage,
) -> Result<Json<AssistantResponse>, AirDrawError> {
    let image = imaging::normalize(&upload.bytes)?;
    if !state.vision.is_configured() {
        info!("Screen analysis requested without a vision key");
        return Ok(Json(AssistantResponse {
            status: ResponseStatus::Error,
            response: SCREEN_UNAVAILABLE_MESSAGE.to_string(),
        }));
    }

    let response = vision::describe(
        &state.vision,
        &image,
        crate::constants::SCREEN_INSTRUCTION,
        SCREEN_SAMPLING,
    )
    .await?;
    Ok(Json(AssistantResponse {
        status: ResponseStatus::Success,
        response,
    }))
}
