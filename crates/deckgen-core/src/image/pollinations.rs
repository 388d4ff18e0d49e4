//! Pollinations image endpoint: `GET {base}/{prompt}?width=..&height=..`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use super::{ImageError, ImageFormat, ImageProvider, ImageRef};

pub const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai/prompt";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

pub struct PollinationsProvider {
    base_url: String,
    client: reqwest::Client,
}

impl PollinationsProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Request URL with the prompt as one percent-encoded path segment.
    fn request_url(&self, prompt: &str) -> Result<Url, ImageError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| ImageError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ImageError::InvalidUrl(self.base_url.clone()))?
            .push(prompt);
        url.query_pairs_mut()
            .append_pair("width", &WIDTH.to_string())
            .append_pair("height", &HEIGHT.to_string())
            .append_pair("nologo", "true");
        Ok(url)
    }
}

impl Default for PollinationsProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ImageProvider for PollinationsProvider {
    fn name(&self) -> &str {
        "pollinations"
    }

    async fn generate(&self, prompt: &str) -> Result<ImageRef, ImageError> {
        let url = self.request_url(prompt)?;
        info!(prompt_len = prompt.len(), "requesting slide image");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let format = ImageFormat::from_content_type(&content_type)
            .ok_or(ImageError::UnsupportedType(content_type))?;

        let bytes = resp.bytes().await?;
        let image = ImageRef::from_bytes(&bytes, format)?;
        debug!(path = %image.path().display(), bytes = bytes.len(), "image staged");
        Ok(image)
    }
}
