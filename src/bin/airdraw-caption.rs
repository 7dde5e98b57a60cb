//! Run one drawing pipeline against a local image file.

use std::path::PathBuf;
use std::time::Duration;

use airdraw::config::{ProviderConfig, parse_illustration_base, setup_logging};
use airdraw::constants::{
    DEFAULT_COMPLETIONS_URL, DEFAULT_ILLUSTRATION_URL, DEFAULT_VISION_MODEL,
};
use airdraw::imaging;
use airdraw::pipeline::{self, DrawingPipeline};
use airdraw::provider::ProviderClient;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::json;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Short object name and a clean illustration
    Analyze,
    /// Sentence describing the finished artwork
    Finish,
    /// Line art to trace over
    Ghost,
}

impl Mode {
    fn pipeline(self) -> DrawingPipeline {
        match self {
            Mode::Analyze => pipeline::ANALYZE,
            Mode::Finish => pipeline::FINISH,
            Mode::Ghost => pipeline::GHOST_GUIDE,
        }
    }
}

/// Caption a drawing and print the illustration URL.
///
///   airdraw-caption sketch.png --mode ghost
#[derive(Parser, Debug)]
#[command(name = "airdraw-caption")]
struct Args {
    /// Image to caption (PNG, JPEG, GIF, WebP or BMP)
    image: PathBuf,

    /// Which pipeline to run
    #[arg(long, value_enum, default_value_t = Mode::Analyze)]
    mode: Mode,

    /// Vision API key
    #[arg(required = true, long, env = "VISION_API_KEY", hide_env_values = true)]
    vision_api_key: String,

    #[arg(long, default_value = DEFAULT_COMPLETIONS_URL, env = "AIRDRAW_VISION_URL")]
    vision_url: String,

    #[arg(long, default_value = DEFAULT_VISION_MODEL, env = "AIRDRAW_VISION_MODEL")]
    vision_model: String,

    #[arg(long, default_value = DEFAULT_ILLUSTRATION_URL, env = "AIRDRAW_ILLUSTRATION_URL")]
    illustration_url: String,

    /// Give up on the vision provider after this many seconds
    #[arg(long, env = "AIRDRAW_PROVIDER_TIMEOUT_SECS")]
    provider_timeout_secs: Option<u64>,

    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.debug)?;

    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let image = imaging::normalize(&bytes)
        .with_context(|| format!("Failed to decode {}", args.image.display()))?;

    let vision = ProviderClient::new(
        &ProviderConfig {
            endpoint: args.vision_url,
            model: args.vision_model,
            api_key: Some(args.vision_api_key),
        },
        args.provider_timeout_secs.map(Duration::from_secs),
    )?;
    let base = parse_illustration_base(&args.illustration_url)?;

    let outcome = args.mode.pipeline().run(&vision, &image, &base).await?;
    let output = json!({
        "description": outcome.description,
        "image_url": outcome.image_url,
        "status": outcome.status,
        "model": vision.model(),
        "width": image.width(),
        "height": image.height(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
