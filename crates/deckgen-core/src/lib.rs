//! Core of deckgen: outline parsing, text and image providers, content
//! orchestration and `.pptx` rendering.

pub mod content;
pub mod image;
pub mod outline;
pub mod provider;
pub mod render;
