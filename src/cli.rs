//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_COMPLETIONS_URL, DEFAULT_ILLUSTRATION_URL, DEFAULT_MEDIA_DIR,
    DEFAULT_VISION_MODEL,
};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "AIRDRAW_DEBUG")]
    /// Enable debug logging. Env: AIRDRAW_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "8000", env = "AIRDRAW_PORT")]
    /// http listener, defaults to `8000`.
    /// Env: AIRDRAW_PORT
    pub port: NonZeroU16,
    #[clap(long, short, default_value = "0.0.0.0", env = "AIRDRAW_LISTEN_ADDRESS")]
    /// Listen address, defaults to `0.0.0.0`.
    /// Env: AIRDRAW_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "GROQ_API_KEY", hide_env_values = true)]
    /// API key for the chat provider. Required.
    /// Env: GROQ_API_KEY
    pub groq_api_key: String,
    #[clap(long, env = "VISION_API_KEY", hide_env_values = true)]
    /// API key for the vision provider. Vision features degrade to placeholders without it.
    /// Env: VISION_API_KEY
    pub vision_api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_COMPLETIONS_URL, env = "AIRDRAW_CHAT_URL")]
    /// Chat completions endpoint used for voice chat.
    /// Env: AIRDRAW_CHAT_URL
    pub chat_url: String,
    #[clap(long, default_value = DEFAULT_COMPLETIONS_URL, env = "AIRDRAW_VISION_URL")]
    /// Chat completions endpoint used for image captioning.
    /// Env: AIRDRAW_VISION_URL
    pub vision_url: String,
    #[clap(long, default_value = DEFAULT_CHAT_MODEL, env = "AIRDRAW_CHAT_MODEL")]
    /// Env: AIRDRAW_CHAT_MODEL
    pub chat_model: String,
    #[clap(long, default_value = DEFAULT_VISION_MODEL, env = "AIRDRAW_VISION_MODEL")]
    /// Env: AIRDRAW_VISION_MODEL
    pub vision_model: String,
    #[clap(long, default_value = DEFAULT_ILLUSTRATION_URL, env = "AIRDRAW_ILLUSTRATION_URL")]
    /// Base URL of the text-to-image service, the prompt is appended as a path segment.
    /// Env: AIRDRAW_ILLUSTRATION_URL
    pub illustration_url: String,

    #[clap(long, default_value = DEFAULT_MEDIA_DIR, env = "AIRDRAW_MEDIA_DIR")]
    /// Where saved drawings are written, served under `/media`.
    /// Env: AIRDRAW_MEDIA_DIR
    pub media_dir: PathBuf,
    #[clap(long, env = "AIRDRAW_PROVIDER_TIMEOUT_SECS")]
    /// Per-request timeout for provider calls, in seconds. Unset means no timeout.
    /// Env: AIRDRAW_PROVIDER_TIMEOUT_SECS
    pub provider_timeout_secs: Option<u64>,
}
