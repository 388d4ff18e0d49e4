//! Provider selection and connection settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ProviderError;

/// Default request timeout for text generation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Which text-generation backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Hosted Gemini API.
    #[default]
    Gemini,
    /// Locally-hosted Ollama server.
    Ollama,
    /// Hugging Face text-generation inference API.
    HuggingFace,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::Gemini, Self::Ollama, Self::HuggingFace];

    /// Registry key, e.g. `"gemini"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
            Self::HuggingFace => "huggingface",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash-lite",
            Self::Ollama => "llama3.1",
            Self::HuggingFace => "google/flan-t5-base",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Ollama => "http://localhost:11434",
            Self::HuggingFace => "https://router.huggingface.co/hf-inference",
        }
    }

    /// Whether requests fail without an API key.
    pub fn requires_api_key(self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// Human-readable vendor label for the banner and health output.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Gemini => "Google AI Studio",
            Self::Ollama => "Ollama",
            Self::HuggingFace => "Hugging Face Inference",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            _ => Err(ProviderError::Unknown(s.to_owned())),
        }
    }
}

/// Resolved settings for one provider instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Settings with every field at the kind's default.
    pub fn for_kind(kind: ProviderKind) -> Self {
        Self {
            kind,
            model: kind.default_model().to_string(),
            api_key: None,
            base_url: kind.default_base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API key, or [`ProviderError::NotConfigured`] when the kind needs
    /// one and none (or an empty one) was given.
    pub(crate) fn require_key(&self) -> Result<&str, ProviderError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => Ok(k),
            _ => Err(ProviderError::NotConfigured {
                provider: self.kind.as_str(),
                reason: "no API key set".to_string(),
            }),
        }
    }

    /// Shared HTTP client honouring the configured timeout.
    pub(crate) fn http_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }
}
