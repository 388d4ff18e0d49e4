//! Hosted Gemini API (`models/{model}:generateContent`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::config::ProviderSettings;
use super::error::{ProviderError, check_status};
use super::trait_def::TextProvider;

const NAME: &str = "gemini";

pub struct GeminiProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        let client = settings.http_client();
        Self { settings, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        )
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        Some(text)
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let key = self.settings.require_key()?;

        info!(provider = NAME, model = %self.settings.model, prompt_len = prompt.len(), "calling text provider");

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.8,
                "topP": 0.9,
                "topK": 50,
                "maxOutputTokens": 4096,
            }
        });

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::http(NAME, e))?;
        let resp = check_status(NAME, resp).await?;

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::malformed(NAME, e.to_string()))?;

        let text = parsed
            .into_text()
            .ok_or_else(|| ProviderError::malformed(NAME, "no candidates in response"))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::Empty { provider: NAME });
        }

        debug!(provider = NAME, len = text.len(), "text provider responded");
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;
    use crate::provider::test_server::spawn;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    fn settings(base: &str) -> ProviderSettings {
        ProviderSettings::for_kind(ProviderKind::Gemini)
            .with_base_url(base)
            .with_api_key("test-key")
    }

    #[tokio::test]
    async fn generate_joins_candidate_parts() {
        let app = Router::new().route(
            "/models/gemini-2.5-flash-lite:generateContent",
            post(|headers: HeaderMap| async move {
                assert_eq!(headers["x-goog-api-key"], "test-key");
                axum::Json(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "Slide 1: A\n" }, { "text": "- bullet text here" }] }
                    }]
                }))
            }),
        );
        let base = spawn(app).await;

        let provider = GeminiProvider::new(settings(&base));
        let text = provider.generate("hi").await.unwrap();
        assert_eq!(text, "Slide 1: A\n- bullet text here");
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let provider = GeminiProvider::new(ProviderSettings::for_kind(ProviderKind::Gemini));
        let err = provider.generate("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured { .. }));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let app = Router::new().route(
            "/models/gemini-2.5-flash-lite:generateContent",
            post(|| async { (StatusCode::FORBIDDEN, "quota exceeded") }),
        );
        let base = spawn(app).await;

        let err = GeminiProvider::new(settings(&base))
            .generate("hi")
            .await
            .unwrap_err();
        match err {
            ProviderError::Status { status, detail, .. } => {
                assert_eq!(status, 403);
                assert!(detail.contains("quota"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn blank_text_is_empty_error() {
        let app = Router::new().route(
            "/models/gemini-2.5-flash-lite:generateContent",
            post(|| async {
                axum::Json(json!({ "candidates": [{ "content": { "parts": [{ "text": "  \n" }] } }] }))
            }),
        );
        let base = spawn(app).await;

        let err = GeminiProvider::new(settings(&base))
            .generate("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Empty { provider: "gemini" }));
    }

    #[tokio::test]
    async fn no_candidates_is_malformed() {
        let app = Router::new().route(
            "/models/gemini-2.5-flash-lite:generateContent",
            post(|| async { axum::Json(json!({ "promptFeedback": {} })) }),
        );
        let base = spawn(app).await;

        let err = GeminiProvider::new(settings(&base))
            .generate("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }
}
