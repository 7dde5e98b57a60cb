//! Config handling

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use tracing::log::LevelFilter;
use url::Url;

use crate::cli::CliOptions;
use crate::error::AirDrawError;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Settings for one chat-completions provider.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// Full URL of the chat completions endpoint.
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Bearer token, `None` when the provider is not configured.
    pub api_key: Option<String>,
}

/// Everything the server needs, resolved once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Text provider used for voice chat.
    pub chat: ProviderConfig,
    /// Multimodal provider used for captions and screen descriptions.
    pub vision: ProviderConfig,
    /// Base URL of the illustration service.
    pub illustration_base: Url,
    /// Directory where saved drawings are written.
    pub media_dir: PathBuf,
    /// Timeout applied to every provider request, `None` waits indefinitely.
    pub provider_timeout: Option<Duration>,
}

impl TryFrom<&CliOptions> for AppConfig {
    type Error = AirDrawError;

    fn try_from(cli: &CliOptions) -> Result<Self, Self::Error> {
        let groq_api_key = non_empty(Some(cli.groq_api_key.as_str()))
            .ok_or_else(|| AirDrawError::Config("GROQ_API_KEY is not set".to_string()))?;
        info!("Groq API key loaded: {}", mask_key(&groq_api_key));

        let vision_api_key = non_empty(cli.vision_api_key.as_deref());
        match vision_api_key.as_deref() {
            Some(key) => info!("Vision API key loaded: {}", mask_key(key)),
            None => {
                tracing::warn!("VISION_API_KEY is not set, vision features will use placeholders")
            }
        }

        let illustration_base = parse_illustration_base(&cli.illustration_url)?;

        Ok(Self {
            chat: ProviderConfig {
                endpoint: cli.chat_url.clone(),
                model: cli.chat_model.clone(),
                api_key: Some(groq_api_key),
            },
            vision: ProviderConfig {
                endpoint: cli.vision_url.clone(),
                model: cli.vision_model.clone(),
                api_key: vision_api_key,
            },
            illustration_base,
            media_dir: cli.media_dir.clone(),
            provider_timeout: cli.provider_timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Parses the illustration base, which must be able to take path segments.
pub fn parse_illustration_base(value: &str) -> Result<Url, AirDrawError> {
    let url = Url::parse(value)?;
    if url.cannot_be_a_base() {
        return Err(AirDrawError::Config(format!(
            "Illustration URL can't take a prompt path: {value}"
        )));
    }
    Ok(url)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Shows just enough of a secret to tell keys apart in the logs.
fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(6).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> CliOptions {
        let mut argv = vec!["airdraw"];
        argv.extend_from_slice(args);
        CliOptions::try_parse_from(argv).expect("parse cli")
    }

    #[test]
    fn test_blank_groq_key_is_fatal() {
        let cli = parse(&["--groq-api-key", "   "]);
        assert!(matches!(
            AppConfig::try_from(&cli),
            Err(AirDrawError::Config(_))
        ));
    }

    #[test]
    fn test_vision_key_is_optional() {
        let cli = parse(&["--groq-api-key", "gsk_test", "--vision-api-key", ""]);
        let config = AppConfig::try_from(&cli).expect("config");
        assert_eq!(config.chat.api_key.as_deref(), Some("gsk_test"));
        assert!(config.vision.api_key.is_none());
        assert_eq!(config.illustration_base.as_str(), "https://image.pollinations.ai/prompt");
        assert!(config.provider_timeout.is_none());
    }

    #[test]
    fn test_provider_timeout_when_configured() {
        let cli = parse(&["--groq-api-key", "gsk_test", "--provider-timeout-secs", "30"]);
        let config = AppConfig::try_from(&cli).expect("config");
        assert_eq!(config.provider_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_illustration_base_must_take_paths() {
        assert!(parse_illustration_base("mailto:someone@example.org").is_err());
        assert!(parse_illustration_base("not a url").is_err());
        assert!(parse_illustration_base("http://localhost:9999/prompt").is_ok());
    }

    #[test]
    fn test_mask_key_hides_the_secret() {
        assert_eq!(mask_key("gsk_abcdefghijkl"), "gsk_ab...");
        assert_eq!(mask_key("abc"), "abc...");
    }
}
