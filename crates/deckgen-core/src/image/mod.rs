//! Slide illustrations.
//!
//! Images are fetched into temporary files owned by [`ImageRef`]; the file
//! is removed when the last clone is dropped.

pub mod pollinations;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use thiserror::Error;

pub use pollinations::PollinationsProvider;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image endpoint returned HTTP {0}")]
    Status(u16),

    #[error("unsupported image content type {0:?}")]
    UnsupportedType(String),

    #[error("image endpoint returned no data")]
    Empty,

    #[error("invalid image endpoint URL {0:?}")]
    InvalidUrl(String),

    #[error("failed to stage image: {0}")]
    Io(#[from] std::io::Error),
}

/// Image formats the renderer can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// Map a `Content-Type` header value (parameters ignored).
    pub fn from_content_type(value: &str) -> Option<Self> {
        let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match mime.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

/// A fetched image staged on disk.
#[derive(Debug, Clone)]
pub struct ImageRef {
    file: Arc<NamedTempFile>,
    format: ImageFormat,
}

impl ImageRef {
    /// Stage `bytes` in a new temporary file.
    pub fn from_bytes(bytes: &[u8], format: ImageFormat) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        let mut file = tempfile::Builder::new()
            .prefix("deckgen-img-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            file: Arc::new(file),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.path())
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

/// Source of slide illustrations.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch one image for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<ImageRef, ImageError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn ImageProvider) {}
};
