//! Outline generation with provider fallback, plus slide illustrations.

pub mod service;

pub use service::{
    ContentService, ContentSource, GeneratedContent, IMAGE_EVERY, MIN_ACCEPTED_SLIDES,
    attach_images, image_prompt,
};
