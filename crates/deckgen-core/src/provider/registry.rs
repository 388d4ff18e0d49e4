//! Provider registry -- a named collection of text providers.
//!
//! The server registers every configured backend at startup and resolves
//! the active one by name.

use std::collections::HashMap;
use std::sync::Arc;

use super::config::{ProviderKind, ProviderSettings};
use super::error::ProviderError;
use super::trait_def::TextProvider;
use super::{GeminiProvider, HuggingFaceProvider, OllamaProvider};

/// A collection of registered [`TextProvider`] implementations, keyed by name.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn TextProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under [`TextProvider::name`], returning any
    /// provider it replaced.
    pub fn register(&mut self, provider: impl TextProvider + 'static) -> Option<Arc<dyn TextProvider>> {
        let name = provider.name().to_string();
        self.providers.insert(name, Arc::new(provider))
    }

    /// Register an already-shared provider.
    pub fn register_shared(&mut self, provider: Arc<dyn TextProvider>) -> Option<Arc<dyn TextProvider>> {
        let name = provider.name().to_string();
        self.providers.insert(name, provider)
    }

    /// One provider per [`ProviderKind`]: `active` with its full settings,
    /// the others with their defaults.
    pub fn with_active(active: &ProviderSettings) -> Self {
        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            let settings = if kind == active.kind {
                active.clone()
            } else {
                ProviderSettings::for_kind(kind)
            };
            registry.register_shared(build_provider(settings));
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TextProvider>> {
        self.providers.get(name).cloned()
    }

    /// Like [`Self::get`] but reports unknown names as an error.
    pub fn require(&self, name: &str) -> Result<Arc<dyn TextProvider>, ProviderError> {
        self.get(name)
            .ok_or_else(|| ProviderError::Unknown(name.to_string()))
    }

    /// Names of all registered providers, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.list())
            .finish()
    }
}

/// Build a provider for the given settings.
pub fn build_provider(settings: ProviderSettings) -> Arc<dyn TextProvider> {
    match settings.kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(settings)),
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(settings)),
        ProviderKind::HuggingFace => Arc::new(HuggingFaceProvider::new(settings)),
    }
}
