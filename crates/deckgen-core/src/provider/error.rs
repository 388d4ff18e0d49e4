use thiserror::Error;

/// Failures from a text or image provider call.
///
/// None of these reach HTTP clients directly: the content service logs them
/// and falls back to deterministic content.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider {provider} is not configured: {reason}")]
    NotConfigured {
        provider: &'static str,
        reason: String,
    },

    #[error("unknown provider {0:?} (expected gemini, ollama, or huggingface)")]
    Unknown(String),

    #[error("request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}: {detail}")]
    Status {
        provider: &'static str,
        status: u16,
        detail: String,
    },

    #[error("{provider} returned an empty response")]
    Empty { provider: &'static str },

    #[error("{provider} response is malformed: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },
}

impl ProviderError {
    pub(crate) fn http(provider: &'static str, source: reqwest::Error) -> Self {
        Self::Http { provider, source }
    }

    pub(crate) fn malformed(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            provider,
            detail: detail.into(),
        }
    }
}

/// Turn a non-success response into [`ProviderError::Status`], keeping a
/// short prefix of the body for the log.
pub(crate) async fn check_status(
    provider: &'static str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let detail: String = body.chars().take(300).collect();
    Err(ProviderError::Status {
        provider,
        status: status.as_u16(),
        detail,
    })
}
