//! Captions drawings through the multimodal provider.

use tracing::{debug, warn};

use crate::imaging::NormalizedImage;
use crate::provider::{ChatMessage, ProviderClient, ProviderError, Sampling};

/// Characters stripped from both ends of a caption.
const CAPTION_TRIM: &[char] = &['.', '"', '\''];

/// What to ask the vision model, and what to say when it can't answer.
#[derive(Clone, Copy, Debug)]
pub struct CaptionTask {
    /// Instruction sent alongside the image.
    pub instruction: &'static str,
    /// Sampling parameters for the call.
    pub sampling: Sampling,
    /// Word limit for short captions, `None` keeps the full text.
    pub max_words: Option<usize>,
    /// Caption used whenever the provider fails.
    pub fallback: &'static str,
}

/// Lower-cases a caption, trims quotes and periods from the ends and
/// optionally keeps only the first `max_words` words.
///
/// Applying it twice gives the same result as applying it once.
pub fn clean_caption(raw: &str, max_words: Option<usize>) -> String {
    let lowered = raw.to_lowercase();
    let words = lowered.split_whitespace();
    let joined = match max_words {
        Some(limit) => words.take(limit).collect::<Vec<_>>().join(" "),
        None => words.collect::<Vec<_>>().join(" "),
    };
    joined
        .trim_matches(|c: char| c.is_whitespace() || CAPTION_TRIM.contains(&c))
        .to_string()
}

/// Captions an image, falling back to the task's default on any provider failure.
pub async fn caption(
    client: &ProviderClient,
    image: &NormalizedImage,
    task: &CaptionTask,
) -> String {
    match describe(client, image, task.instruction, task.sampling).await {
        Ok(raw) => {
            let cleaned = clean_caption(&raw, task.max_words);
            if cleaned.is_empty() {
                warn!("Vision provider returned an empty caption, using {:?}", task.fallback);
                task.fallback.to_string()
            } else {
                debug!("Caption: {:?}", cleaned);
                cleaned
            }
        }
        Err(err) => {
            warn!("Vision provider error, using {:?}: {}", task.fallback, err);
            task.fallback.to_string()
        }
    }
}

/// Asks the vision model about an image and returns its answer trimmed of whitespace.
pub async fn describe(
    client: &ProviderClient,
    image: &NormalizedImage,
    instruction: &str,
    sampling: Sampling,
) -> Result<String, ProviderError> {
    let messages = [ChatMessage::user_with_image(instruction, image.data_url())];
    let reply = client.complete(&messages, sampling).await?;
    Ok(reply.trim().to_string())
}
