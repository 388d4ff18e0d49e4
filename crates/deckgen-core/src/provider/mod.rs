//! Text-generation providers.
//!
//! [`TextProvider`] is the seam between the content service and concrete
//! LLM backends; [`ProviderRegistry`] resolves the configured one by name.

pub mod config;
pub mod error;
pub mod gemini;
pub mod huggingface;
pub mod ollama;
pub mod registry;
pub mod trait_def;

pub use config::{DEFAULT_TIMEOUT, ProviderKind, ProviderSettings};
pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use huggingface::HuggingFaceProvider;
pub use ollama::OllamaProvider;
pub use registry::{ProviderRegistry, build_provider};
pub use trait_def::TextProvider;
