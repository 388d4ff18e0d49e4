//! Content orchestration: provider call, parse, fallback.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::image::ImageProvider;
use crate::outline::{
    ContentDepth, PromptRequest, SlideSpec, generate_fallback, minimal_outline, parse_outline,
    render_prompt,
};
use crate::provider::{ProviderError, TextProvider};

/// Fewest parsed slides accepted from a provider, capped by the request.
pub const MIN_ACCEPTED_SLIDES: usize = 3;

/// Provider attempts before falling back.
const MAX_ATTEMPTS: usize = 2;

/// Every n-th slide (starting with the first) gets an illustration.
pub const IMAGE_EVERY: usize = 3;

/// Where the slides of a [`GeneratedContent`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Parsed from the named provider's response.
    Provider(String),
    /// The built-in template bank.
    Fallback,
    /// The single guaranteed slide.
    MinimalFallback,
}

impl ContentSource {
    pub fn is_ai_generated(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(name) => f.write_str(name),
            Self::Fallback => f.write_str("fallback"),
            Self::MinimalFallback => f.write_str("minimal_fallback"),
        }
    }
}

impl Serialize for ContentSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedContent {
    pub slides: Vec<SlideSpec>,
    pub source: ContentSource,
}

/// Generates slide outlines with the active provider, never failing.
#[derive(Clone)]
pub struct ContentService {
    provider: Arc<dyn TextProvider>,
}

impl fmt::Debug for ContentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentService")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl ContentService {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    async fn request_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut last_err = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.provider.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(
                        provider = self.provider.name(),
                        attempt,
                        error = %e,
                        "text generation failed"
                    );
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or(ProviderError::Empty {
            provider: "content",
        }))
    }

    /// Produce exactly-shaped slides for `topic`.
    ///
    /// Provider text is accepted when it parses into at least
    /// `min(MIN_ACCEPTED_SLIDES, slides)` slides. Otherwise the template bank
    /// is used, and if that is empty too, the minimal outline.
    pub async fn generate(
        &self,
        topic: &str,
        slides: usize,
        depth: ContentDepth,
        notes: Option<&str>,
    ) -> GeneratedContent {
        let prompt = render_prompt(&PromptRequest {
            topic,
            slides,
            depth,
            notes,
        });
        let provider = self.provider.name().to_string();
        info!(topic, slides, %depth, %provider, "generating outline");

        match self.request_text(&prompt).await {
            Ok(text) => {
                let parsed = parse_outline(&text, depth, slides);
                let needed = MIN_ACCEPTED_SLIDES.min(slides);
                if parsed.len() >= needed && !parsed.is_empty() {
                    info!(%provider, parsed = parsed.len(), "outline accepted");
                    return GeneratedContent {
                        slides: parsed,
                        source: ContentSource::Provider(provider),
                    };
                }
                warn!(%provider, parsed = parsed.len(), needed, "too few slides parsed");
            }
            Err(e) => {
                warn!(%provider, error = %e, "provider unavailable, using fallback");
            }
        }

        let fallback = parse_outline(&generate_fallback(topic, slides, depth), depth, slides);
        if !fallback.is_empty() {
            debug!(slides = fallback.len(), "fallback outline used");
            return GeneratedContent {
                slides: fallback,
                source: ContentSource::Fallback,
            };
        }

        warn!(topic, "fallback empty, using minimal outline");
        GeneratedContent {
            slides: minimal_outline(topic, depth),
            source: ContentSource::MinimalFallback,
        }
    }
}

/// Prompt sent to the image provider for a slide.
pub fn image_prompt(title: &str) -> String {
    format!(
        "professional business presentation slide about {title}, clean modern corporate design, informative content"
    )
}

/// Fetch illustrations for every [`IMAGE_EVERY`]-th slide concurrently.
///
/// Failed fetches are logged and leave the slide without an image.
/// Returns the number of images attached.
pub async fn attach_images(slides: &mut [SlideSpec], images: &dyn ImageProvider) -> usize {
    let targets: Vec<usize> = (0..slides.len()).step_by(IMAGE_EVERY).collect();
    let prompts: Vec<String> = targets.iter().map(|&i| image_prompt(&slides[i].title)).collect();
    let results = join_all(prompts.iter().map(|p| images.generate(p))).await;

    let mut attached = 0;
    for (i, result) in targets.into_iter().zip(results) {
        match result {
            Ok(image) => {
                slides[i].image = Some(image);
                attached += 1;
            }
            Err(e) => {
                warn!(
                    provider = images.name(),
                    slide = i,
                    error = %e,
                    "image generation failed, continuing without"
                );
            }
        }
    }
    attached
}
