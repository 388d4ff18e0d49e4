//! The `TextProvider` trait -- the adapter interface for LLM backends.
//!
//! Each concrete provider (Gemini, Ollama, Hugging Face) implements this
//! trait. The trait is object-safe so it can be stored as
//! `Box<dyn TextProvider>` in the [`super::ProviderRegistry`].

use async_trait::async_trait;

use super::error::ProviderError;

/// Prompt sent by the default [`TextProvider::health`] probe.
pub const HEALTH_PROMPT: &str =
    "Hello, are you working? Respond with 'Yes, ready for presentation generation.'";

/// Adapter interface for text-generation backends.
///
/// Implementors translate a plain prompt into the backend's request format
/// and return the generated text. Implementations must not retry; the
/// content service owns the retry policy.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Registry key for this provider (e.g. "gemini").
    fn name(&self) -> &str;

    /// Model identifier sent to the backend.
    fn model(&self) -> &str;

    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Cheap liveness probe. Returns a short status line on success.
    async fn health(&self) -> Result<String, ProviderError> {
        let reply = self.generate(HEALTH_PROMPT).await?;
        Ok(reply.chars().take(120).collect())
    }
}

// Compile-time assertion: TextProvider must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn TextProvider) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl TextProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            Ok(prompt.to_string())
        }
    }

    #[test]
    fn provider_is_object_safe() {
        let provider: Box<dyn TextProvider> = Box::new(EchoProvider);
        assert_eq!(provider.name(), "echo");
        assert_eq!(provider.model(), "echo-1");
    }

    #[tokio::test]
    async fn default_health_uses_generate() {
        let provider: Box<dyn TextProvider> = Box::new(EchoProvider);
        let status = provider.health().await.unwrap();
        assert!(status.starts_with("Hello, are you working?"));
        assert!(status.chars().count() <= 120);
    }
}
