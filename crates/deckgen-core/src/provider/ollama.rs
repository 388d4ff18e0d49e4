//! Locally-hosted Ollama server (`/api/generate`, non-streaming).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::config::ProviderSettings;
use super::error::{ProviderError, check_status};
use super::trait_def::TextProvider;

const NAME: &str = "ollama";

pub struct OllamaProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        let client = settings.http_client();
        Self { settings, client }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[async_trait]
impl TextProvider for OllamaProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        info!(provider = NAME, model = %self.settings.model, prompt_len = prompt.len(), "calling text provider");

        let body = json!({
            "model": self.settings.model,
            "prompt": prompt,
            "stream": false,
            "options": { "temperature": 0.8, "top_p": 0.9, "top_k": 50 }
        });

        let resp = self
            .client
            .post(format!("{}/api/generate", self.settings.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::http(NAME, e))?;
        let resp = check_status(NAME, resp).await?;

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::malformed(NAME, e.to_string()))?;

        let text = parsed.response.trim();
        if text.is_empty() {
            return Err(ProviderError::Empty { provider: NAME });
        }
        debug!(provider = NAME, len = text.len(), "text provider responded");
        Ok(text.to_string())
    }

    /// Lists local models instead of running a generation.
    async fn health(&self) -> Result<String, ProviderError> {
        let resp = self
            .client
            .get(format!("{}/api/tags", self.settings.base_url))
            .send()
            .await
            .map_err(|e| ProviderError::http(NAME, e))?;
        let resp = check_status(NAME, resp).await?;
        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::malformed(NAME, e.to_string()))?;

        let wanted = &self.settings.model;
        let present = tags
            .models
            .iter()
            .any(|m| m.name == *wanted || m.name.split(':').next() == Some(wanted.as_str()));
        if present {
            Ok(format!("model {wanted} available"))
        } else {
            Err(ProviderError::NotConfigured {
                provider: NAME,
                reason: format!("model {wanted} is not pulled"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;
    use crate::provider::test_server::spawn;
    use axum::Router;
    use axum::routing::{get, post};

    fn settings(base: &str) -> ProviderSettings {
        ProviderSettings::for_kind(ProviderKind::Ollama).with_base_url(base)
    }

    #[tokio::test]
    async fn generate_returns_response_field() {
        let app = Router::new().route(
            "/api/generate",
            post(|axum::Json(body): axum::Json<serde_json::Value>| async move {
                assert_eq!(body["model"], "llama3.1");
                assert_eq!(body["stream"], false);
                axum::Json(json!({ "response": "  Slide 1: Hi\n- a bullet line  ", "done": true }))
            }),
        );
        let base = spawn(app).await;

        let text = OllamaProvider::new(settings(&base))
            .generate("p")
            .await
            .unwrap();
        assert_eq!(text, "Slide 1: Hi\n- a bullet line");
    }

    #[tokio::test]
    async fn empty_response_is_error() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { axum::Json(json!({ "response": "" })) }),
        );
        let base = spawn(app).await;

        let err = OllamaProvider::new(settings(&base))
            .generate("p")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Empty { .. }));
    }

    #[tokio::test]
    async fn health_checks_model_tag() {
        let app = Router::new().route(
            "/api/tags",
            get(|| async { axum::Json(json!({ "models": [{ "name": "llama3.1:latest" }] })) }),
        );
        let base = spawn(app).await;

        let ok = OllamaProvider::new(settings(&base)).health().await.unwrap();
        assert!(ok.contains("llama3.1"));

        let missing = OllamaProvider::new(settings(&base).with_model("phi3"))
            .health()
            .await
            .unwrap_err();
        assert!(missing.to_string().contains("phi3"));
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        // Port 9 (discard) is not expected to host an HTTP server.
        let err = OllamaProvider::new(settings("http://127.0.0.1:9"))
            .generate("p")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Http { .. }));
    }
}
