//! Hugging Face text-generation inference API.
//!
//! Responses come either as `[{"generated_text": ...}]` or as a bare
//! object; both shapes are accepted.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::config::ProviderSettings;
use super::error::{ProviderError, check_status};
use super::trait_def::TextProvider;

const NAME: &str = "huggingface";

/// Shorter replies are treated as empty.
const MIN_USEFUL_CHARS: usize = 20;

pub struct HuggingFaceProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        let client = settings.http_client();
        Self { settings, client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<Generated>),
    One(Generated),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct Generated {
    generated_text: String,
}

#[async_trait]
impl TextProvider for HuggingFaceProvider {
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
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": 800,
                "temperature": 0.7,
                "do_sample": true,
                "top_p": 0.9,
                "return_full_text": false
            }
        });

        let resp = self
            .client
            .post(format!(
                "{}/models/{}",
                self.settings.base_url, self.settings.model
            ))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::http(NAME, e))?;
        let resp = check_status(NAME, resp).await?;

        let parsed: InferenceResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::malformed(NAME, e.to_string()))?;

        let text = match parsed {
            InferenceResponse::Many(items) => items
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .unwrap_or_default(),
            InferenceResponse::One(g) => g.generated_text,
            InferenceResponse::Error { error } => {
                return Err(ProviderError::malformed(NAME, error));
            }
        };

        let text = text.trim();
        if text.chars().count() < MIN_USEFUL_CHARS {
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
    use axum::http::HeaderMap;
    use axum::routing::post;

    const ROUTE: &str = "/models/google/flan-t5-base";

    fn settings(base: &str) -> ProviderSettings {
        ProviderSettings::for_kind(ProviderKind::HuggingFace)
            .with_base_url(base)
            .with_api_key("hf_token")
    }

    #[tokio::test]
    async fn accepts_list_shape_and_sends_bearer() {
        let app = Router::new().route(
            ROUTE,
            post(|headers: HeaderMap| async move {
                assert_eq!(headers["authorization"], "Bearer hf_token");
                axum::Json(json!([{ "generated_text": "Slide 1: Intro\n- generated bullet text" }]))
            }),
        );
        let base = spawn(app).await;

        let text = HuggingFaceProvider::new(settings(&base))
            .generate("p")
            .await
            .unwrap();
        assert!(text.starts_with("Slide 1: Intro"));
    }

    #[tokio::test]
    async fn accepts_object_shape() {
        let app = Router::new().route(
            ROUTE,
            post(|| async { axum::Json(json!({ "generated_text": "Slide 1: Object shape reply\n- ok" })) }),
        );
        let base = spawn(app).await;

        let text = HuggingFaceProvider::new(settings(&base))
            .generate("p")
            .await
            .unwrap();
        assert!(text.contains("Object shape"));
    }

    #[tokio::test]
    async fn error_body_is_malformed() {
        let app = Router::new().route(
            ROUTE,
            post(|| async { axum::Json(json!({ "error": "Model is currently loading" })) }),
        );
        let base = spawn(app).await;

        let err = HuggingFaceProvider::new(settings(&base))
            .generate("p")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("loading"));
    }

    #[tokio::test]
    async fn short_reply_is_empty() {
        let app = Router::new().route(
            ROUTE,
            post(|| async { axum::Json(json!([{ "generated_text": "ok" }])) }),
        );
        let base = spawn(app).await;

        let err = HuggingFaceProvider::new(settings(&base))
            .generate("p")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Empty { .. }));
    }
}
