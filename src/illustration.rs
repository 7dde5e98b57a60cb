//! Builds URLs for the text-to-image service. Nothing here touches the network,
//! the client fetches the URL itself.

use rand::RngExt;
use url::Url;

use crate::constants::MAX_ILLUSTRATION_SEED;
use crate::error::AirDrawError;

/// Placeholder in a style template that's replaced by the caption.
pub const CAPTION_PLACEHOLDER: &str = "{caption}";

/// How an illustration should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllustrationStyle {
    /// Prompt template containing [`CAPTION_PLACEHOLDER`].
    pub template: &'static str,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Ask the service to enhance the prompt.
    pub enhance: bool,
}

/// One illustration to render, identified by prompt and seed.
#[derive(Clone, Debug)]
pub struct IllustrationRequest<'a> {
    caption: &'a str,
    style: &'a IllustrationStyle,
    seed: u64,
}

impl<'a> IllustrationRequest<'a> {
    /// A request with a fresh random seed, so the service doesn't hand back a cached image.
    pub fn new(caption: &'a str, style: &'a IllustrationStyle) -> Self {
        Self::with_seed(caption, style, random_seed())
    }

    /// A request with a fixed seed.
    pub fn with_seed(caption: &'a str, style: &'a IllustrationStyle, seed: u64) -> Self {
        Self {
            caption,
            style,
            seed,
        }
    }

    /// The seed sent with the request.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The caption interpolated into the style template.
    pub fn prompt(&self) -> String {
        self.style.template.replace(CAPTION_PLACEHOLDER, self.caption)
    }

    /// Appends the encoded prompt and rendering parameters to `base`.
    pub fn to_url(&self, base: &Url) -> Result<Url, AirDrawError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AirDrawError::InternalServerError(format!(
                    "Illustration base URL can't take a path: {base}"
                ))
            })?
            .pop_if_empty()
            .push(&self.prompt());
        url.query_pairs_mut()
            .append_pair("width", &self.style.width.to_string())
            .append_pair("height", &self.style.height.to_string())
            .append_pair("nologo", "true")
            .append_pair("enhance", if self.style.enhance { "true" } else { "false" })
            .append_pair("seed", &self.seed.to_string());
        Ok(url)
    }
}

fn random_seed() -> u64 {
    rand::rng().random_range(1..=MAX_ILLUSTRATION_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const STYLE: IllustrationStyle = IllustrationStyle {
        template: "professional illustration of {caption}, white background",
        width: 512,
        height: 384,
        enhance: true,
    };

    fn base() -> Url {
        Url::parse("https://image.example.org/prompt").expect("base")
    }

    #[test]
    fn test_prompt_interpolation() {
        let request = IllustrationRequest::with_seed("a cat", &STYLE, 7);
        assert_eq!(
            request.prompt(),
            "professional illustration of a cat, white background"
        );
    }

    #[test]
    fn test_url_shape() {
        let url = IllustrationRequest::with_seed("a cat", &STYLE, 42)
            .to_url(&base())
            .expect("url");
        assert_eq!(
            url.path(),
            "/prompt/professional%20illustration%20of%20a%20cat,%20white%20background"
        );
        let query: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(query["width"], "512");
        assert_eq!(query["height"], "384");
        assert_eq!(query["nologo"], "true");
        assert_eq!(query["enhance"], "true");
        assert_eq!(query["seed"], "42");
    }

    #[test]
    fn test_prompt_cannot_escape_the_path_segment() {
        let url = IllustrationRequest::with_seed("a/b?c#d", &STYLE, 1)
            .to_url(&Url::parse("https://image.example.org/prompt/").expect("base"))
            .expect("url");
        assert_eq!(url.path_segments().map(Iterator::count), Some(2));
        assert!(url.path().contains("a%2Fb%3Fc%23d"));
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_random_seeds_differ() {
        let first = IllustrationRequest::new("tree", &STYLE);
        let second = IllustrationRequest::new("tree", &STYLE);
        assert_ne!(first.seed(), second.seed());
        for seed in [first.seed(), second.seed()] {
            assert!((1..=MAX_ILLUSTRATION_SEED).contains(&seed));
        }
    }
}
