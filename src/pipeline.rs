//! The decode, caption, illustrate flow shared by the drawing endpoints.

use serde::Serialize;
use url::Url;

use crate::error::AirDrawError;
use crate::illustration::{IllustrationRequest, IllustrationStyle};
use crate::imaging::NormalizedImage;
use crate::provider::{ProviderClient, Sampling};
use crate::vision::{self, CaptionTask};

/// Whether a drawing response came from the vision model or from placeholders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Normal result.
    Success,
    /// Degraded or failed result.
    Error,
}

/// One drawing endpoint's caption task and illustration style.
#[derive(Clone, Copy, Debug)]
pub struct DrawingPipeline {
    /// What to ask the vision model.
    pub task: CaptionTask,
    /// How to render the illustration.
    pub style: IllustrationStyle,
}

/// The result of running a pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawingOutcome {
    /// Cleaned caption or the task's fallback.
    pub description: String,
    /// Illustration URL for the client to fetch.
    pub image_url: String,
    /// `Error` when vision isn't configured and a placeholder was used.
    pub status: ResponseStatus,
}

/// Names the main object in 2-3 words and renders a clean illustration of it.
pub const ANALYZE: DrawingPipeline = DrawingPipeline {
    task: CaptionTask {
        instruction: "Analyze this drawing and describe the main object in 2-3 words in English. \
Only respond with the object name, for example: 'sun', 'house', 'tree', 'car', 'flower'. \
Be concise.",
        sampling: Sampling {
            temperature: 0.3,
            max_tokens: 50,
        },
        max_words: Some(3),
        fallback: "drawing",
    },
    style: IllustrationStyle {
        template: "professional illustration of {caption}, clean simple style, white background",
        width: 512,
        height: 512,
        enhance: true,
    },
};

/// Imagines the finished version of a sketch and renders it in detail.
pub const FINISH: DrawingPipeline = DrawingPipeline {
    task: CaptionTask {
        instruction: "This is a rough, unfinished sketch. \
In one or two short sentences in English, describe what the finished artwork should look like, \
including the main subject, colors and setting. \
Only respond with the description.",
        sampling: Sampling {
            temperature: 0.7,
            max_tokens: 120,
        },
        max_words: None,
        fallback: "creative artwork",
    },
    style: IllustrationStyle {
        template: "highly detailed finished artwork of {caption}, vibrant colors, \
professional digital painting, soft lighting",
        width: 768,
        height: 768,
        enhance: true,
    },
};

/// Names the subject and renders line art the user can trace over.
pub const GHOST_GUIDE: DrawingPipeline = DrawingPipeline {
    task: CaptionTask {
        instruction: "Identify the main subject of this sketch in 2-3 words in English. \
Only respond with the subject name, for example: 'cat', 'rocket', 'flower'.",
        sampling: Sampling {
            temperature: 0.3,
            max_tokens: 50,
        },
        max_words: Some(3),
        fallback: "enhanced sketch",
    },
    style: IllustrationStyle {
        template: "simple black line art outline of {caption}, thin clean strokes, \
coloring book style, white background, no shading, no color",
        width: 512,
        height: 512,
        enhance: false,
    },
};

impl DrawingPipeline {
    /// Captions the image and builds the illustration URL.
    ///
    /// Without a vision key the fallback caption is illustrated and the status is `Error`.
    pub async fn run(
        &self,
        vision: &ProviderClient,
        image: &NormalizedImage,
        illustration_base: &Url,
    ) -> Result<DrawingOutcome, AirDrawError> {
        if !vision.is_configured() {
            return self.placeholder(illustration_base);
        }

        let description = vision::caption(vision, image, &self.task).await;
        let image_url =
            IllustrationRequest::new(&description, &self.style).to_url(illustration_base)?;
        Ok(DrawingOutcome {
            description,
            image_url: image_url.to_string(),
            status: ResponseStatus::Success,
        })
    }

    /// A degraded outcome built from the fallback caption.
    pub fn placeholder(&self, illustration_base: &Url) -> Result<DrawingOutcome, AirDrawError> {
        let image_url =
            IllustrationRequest::new(self.task.fallback, &self.style).to_url(illustration_base)?;
        Ok(DrawingOutcome {
            description: self.task.fallback.to_string(),
            image_url: image_url.to_string(),
            status: ResponseStatus::Error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{normalize, tests::sample_png};
    use crate::testing::{UNREACHABLE_ENDPOINT, provider_client as client, spawn_completion_server};

    fn base() -> Url {
        Url::parse("https://image.example.org/prompt").expect("base")
    }

    #[test]
    fn test_templates_carry_the_caption() {
        for pipeline in [ANALYZE, FINISH, GHOST_GUIDE] {
            assert!(pipeline.style.template.contains(crate::illustration::CAPTION_PLACEHOLDER));
        }
    }

    #[tokio::test]
    async fn test_finish_keeps_full_sentence() {
        let endpoint =
            spawn_completion_server("A Castle on a hill at sunset, with red flags.").await;
        let image = normalize(&sample_png()).expect("normalize");
        let outcome = FINISH
            .run(&client(&endpoint, Some("key")), &image, &base())
            .await
            .expect("run");
        assert_eq!(outcome.description, "a castle on a hill at sunset, with red flags");
        assert_eq!(outcome.status, ResponseStatus::Success);
        assert!(outcome.image_url.contains("highly%20detailed%20finished%20artwork"));
        assert!(outcome.image_url.contains("width=768"));
    }

    #[tokio::test]
    async fn test_ghost_guide_fallback_when_unreachable() {
        let image = normalize(&sample_png()).expect("normalize");
        let outcome = GHOST_GUIDE
            .run(&client(UNREACHABLE_ENDPOINT, Some("key")), &image, &base())
            .await
            .expect("run");
        assert_eq!(outcome.description, "enhanced sketch");
        assert_eq!(outcome.status, ResponseStatus::Success);
        assert!(outcome.image_url.contains("enhance=false"));
    }

    #[tokio::test]
    async fn test_unconfigured_vision_uses_placeholder() {
        let image = normalize(&sample_png()).expect("normalize");
        let outcome = ANALYZE
            .run(&client(UNREACHABLE_ENDPOINT, None), &image, &base())
            .await
            .expect("run");
        assert_eq!(outcome.description, "drawing");
        assert_eq!(outcome.status, ResponseStatus::Error);
        assert!(outcome.image_url.starts_with("https://image.example.org/prompt/"));
    }
}
