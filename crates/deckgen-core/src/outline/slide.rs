use serde::{Deserialize, Serialize};

use crate::image::ImageRef;

/// One planned slide: a title and a fixed-length list of bullets.
///
/// Sequences of `SlideSpec` produced by [`super::parse_outline`] always carry
/// exactly `depth.target_bullet_count()` bullets per slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub title: String,
    pub bullets: Vec<String>,
    /// Illustration attached by the image pass. Never serialized.
    #[serde(skip)]
    pub image: Option<ImageRef>,
}

impl SlideSpec {
    pub fn new(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            bullets,
            image: None,
        }
    }
}
