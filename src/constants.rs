//! Shared constants for providers, prompts and storage
//!

/// OpenAI-compatible chat completions endpoint used by default for both chat and vision.
pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default multimodal model for captioning.
pub const DEFAULT_VISION_MODEL: &str = "llama-3.2-90b-vision-preview";

/// Default text model for voice chat.
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";

/// Default text-to-image service, prompts are appended as a path segment.
pub const DEFAULT_ILLUSTRATION_URL: &str = "https://image.pollinations.ai/prompt";

/// Default directory for saved drawings.
pub const DEFAULT_MEDIA_DIR: &str = "./saved_drawings";

/// Public mount point for saved drawings.
pub const MEDIA_ROUTE: &str = "/media";

/// Prefix for saved drawing filenames.
pub const DRAWING_FILE_PREFIX: &str = "airdraw_";

/// Extension for saved drawing filenames.
pub const DRAWING_FILE_EXTENSION: &str = "png";

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Upper bound (inclusive) for illustration seeds.
pub const MAX_ILLUSTRATION_SEED: u64 = 1_000_000_000;

/// User agent sent to providers.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// System prompt for the voice chat assistant.
pub const CHAT_SYSTEM_PROMPT: &str = "You are AirDraw's friendly drawing buddy. \
Reply casually in one or two short sentences, \
like you are chatting while someone sketches in the air. \
Never use lists or markdown.";

/// Instruction for describing a screen capture.
pub const SCREEN_INSTRUCTION: &str =
    "Describe what is shown in this screenshot in one short, friendly sentence.";

/// Returned by analyze-screen when no vision key is configured.
pub const SCREEN_UNAVAILABLE_MESSAGE: &str =
    "Vision is not configured on this server, so I can't see the screen right now.";

/// Message attached to a successful ghost guide.
pub const GHOST_GUIDE_MESSAGE: &str =
    "Ghost guide ready, trace over the lines to finish your drawing.";

/// Message attached to a ghost guide built without vision.
pub const GHOST_GUIDE_UNAVAILABLE_MESSAGE: &str =
    "Vision is not configured, showing a generic guide instead.";

/// Message returned after saving a drawing.
pub const SAVE_MESSAGE: &str = "Drawing saved";
