//! Slide deck rendering.
//!
//! [`render_deck`] lays out a title slide, one content slide per
//! [`SlideSpec`] and a closing slide, then writes the package into a
//! temporary file that is deleted when the [`RenderedDeck`] is dropped.

pub mod pptx;
pub mod theme;

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use deckgen_db::models::ContentDepth;
use regex::Regex;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::outline::SlideSpec;
use pptx::{Align, Deck, DeckSlide, Frame, Layout, Paragraph, Picture, TextBox};
pub use theme::{ColorParseError, Rgb, Theme};

pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Title used when there is nothing to derive one from.
pub const DEFAULT_DECK_TITLE: &str = "AI Presentation";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write presentation package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished `.pptx` staged on disk.
#[derive(Debug)]
pub struct RenderedDeck {
    file: NamedTempFile,
    /// Slides in the package, including title and closing slides.
    pub slide_count: usize,
}

impl RenderedDeck {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the whole package. The temp file is still removed on drop.
    pub fn bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut f = self.file.reopen()?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Leading `"Something: "` label removed from the deck title.
static TITLE_LABEL_RE: LazyLock<Regex> = LazyLock::new(title_label_re);

#[allow(clippy::expect_used)]
fn title_label_re() -> Regex {
    Regex::new(r"^[^:]+:\s*").expect("title label pattern is valid")
}

/// Deck title from the first slide, with any `"Label: "` prefix removed.
pub fn deck_title(slides: &[SlideSpec]) -> String {
    let Some(first) = slides.first() else {
        return DEFAULT_DECK_TITLE.to_string();
    };
    let stripped = TITLE_LABEL_RE.replace(&first.title, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        first.title.trim().to_string()
    } else {
        stripped.to_string()
    }
}

fn plain(text: impl Into<String>, size_pt: u32, bold: bool, color: Rgb, align: Align) -> Paragraph {
    Paragraph {
        text: text.into(),
        size_pt,
        bold,
        color,
        align,
        bullet: false,
        spacing: (0, 0),
    }
}

fn centered_slide(theme: &Theme, title: &str, title_pt: u32, lines: &[String]) -> DeckSlide {
    let heading = TextBox {
        name: "Title",
        frame: Frame::inches(0.75, 1.8, 11.83, 1.8),
        paragraphs: vec![plain(title, title_pt, true, theme.title, Align::Center)],
        centered_vertically: true,
    };
    let sub = TextBox {
        name: "Subtitle",
        frame: Frame::inches(1.5, 3.9, 10.33, 1.8),
        paragraphs: lines
            .iter()
            .map(|l| plain(l.as_str(), 18, false, theme.bullet, Align::Center))
            .collect(),
        centered_vertically: false,
    };
    DeckSlide {
        layout: Layout::Title,
        boxes: vec![heading, sub],
        picture: None,
    }
}

fn content_slide(theme: &Theme, depth: ContentDepth, spec: &SlideSpec) -> DeckSlide {
    let picture = spec.image.as_ref().and_then(|img| match img.read() {
        Ok(bytes) => Some(Picture {
            frame: Frame::inches(7.5, 1.5, 4.5, 3.5),
            bytes,
            format: img.format(),
        }),
        Err(e) => {
            warn!(title = %spec.title, error = %e, "could not read slide image, skipping");
            None
        }
    });

    let body_width = if picture.is_some() { 6.7 } else { 12.33 };
    let spacing = theme::bullet_spacing(depth);

    let heading = TextBox {
        name: "Title",
        frame: Frame::inches(0.5, 0.3, 12.33, 1.0),
        paragraphs: vec![plain(
            spec.title.as_str(),
            theme::content_title_font(&spec.title),
            true,
            theme.title,
            Align::Left,
        )],
        centered_vertically: true,
    };
    let body = TextBox {
        name: "Content",
        frame: Frame::inches(0.5, 1.5, body_width, 5.5),
        paragraphs: spec
            .bullets
            .iter()
            .map(|b| Paragraph {
                text: b.clone(),
                size_pt: theme::bullet_font(depth, b),
                bold: false,
                color: theme.bullet,
                align: Align::Left,
                bullet: true,
                spacing,
            })
            .collect(),
        centered_vertically: false,
    };

    DeckSlide {
        layout: Layout::Content,
        boxes: vec![heading, body],
        picture,
    }
}

/// Lay out the full deck without writing it.
pub fn compose_deck(slides: &[SlideSpec], theme: &Theme, depth: ContentDepth) -> Deck {
    let title = deck_title(slides);
    let per_slide = format!("{} bullet points per slide", depth.target_bullet_count());

    let mut out = Vec::with_capacity(slides.len() + 2);
    out.push(centered_slide(
        theme,
        &title,
        theme::title_slide_font(&title),
        &[
            format!("Professional {} Presentation", depth.label()),
            format!("{} Content Slides • {per_slide}", slides.len()),
        ],
    ));
    out.extend(slides.iter().map(|s| content_slide(theme, depth, s)));
    out.push(centered_slide(
        theme,
        "Thank You",
        36,
        &[
            "Generated with deckgen".to_string(),
            String::new(),
            format!("{} Content • {} Slides • {per_slide}", depth.label(), slides.len()),
        ],
    ));

    Deck {
        title,
        theme: *theme,
        slides: out,
    }
}

fn stage(deck: &Deck) -> Result<RenderedDeck, RenderError> {
    let file = tempfile::Builder::new()
        .prefix("deckgen-")
        .suffix(".pptx")
        .tempfile()?;
    let written = pptx::write_package(file.reopen()?, deck)?;
    written.sync_all()?;
    Ok(RenderedDeck {
        file,
        slide_count: deck.slides.len(),
    })
}

/// Render `slides` into a `.pptx` with title and closing slides.
pub fn render_deck(
    slides: &[SlideSpec],
    theme: &Theme,
    depth: ContentDepth,
) -> Result<RenderedDeck, RenderError> {
    let deck = compose_deck(slides, theme, depth);
    let rendered = stage(&deck)?;
    info!(
        slides = rendered.slide_count,
        path = %rendered.path().display(),
        "presentation rendered"
    );
    Ok(rendered)
}

/// Single-slide recovery deck used when [`render_deck`] fails.
pub fn render_minimal() -> Result<RenderedDeck, RenderError> {
    let theme = Theme::default();
    let deck = Deck {
        title: "AI Presentation Generated".to_string(),
        theme,
        slides: vec![centered_slide(
            &theme,
            "AI Presentation Generated",
            44,
            &[
                "Powered by AI".to_string(),
                String::new(),
                "Professional Quality • Ready to Present".to_string(),
            ],
        )],
    };
    warn!("rendering minimal recovery presentation");
    stage(&deck)
}
