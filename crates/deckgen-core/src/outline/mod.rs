//! Outline model, parser, fallback bank and prompt.

pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod slide;

pub use deckgen_db::models::ContentDepth;
pub use fallback::{bank_size, generate_fallback, minimal_outline};
pub use parser::parse_outline;
pub use prompt::{PromptRequest, render_prompt};
pub use slide::SlideSpec;
