//! `deckgen outline` command: generate slides locally without the server.

use std::path::PathBuf;

use anyhow::{Context, Result};

use deckgen_core::content::{ContentService, attach_images};
use deckgen_core::image::PollinationsProvider;
use deckgen_core::outline::{ContentDepth, SlideSpec};
use deckgen_core::provider::build_provider;
use deckgen_core::render::{self, Rgb, Theme};

use crate::config::DeckgenConfig;

#[derive(Debug)]
pub struct OutlineOptions {
    pub topic: String,
    pub slides: usize,
    pub depth: ContentDepth,
    pub notes: Option<String>,
    /// Write a rendered deck here as well as printing the outline.
    pub pptx: Option<PathBuf>,
    pub style: String,
    pub background: String,
    pub images: bool,
}

pub async fn run_outline(config: &DeckgenConfig, opts: OutlineOptions) -> Result<()> {
    let background = Rgb::from_hex(&opts.background)?;
    let service = ContentService::new(build_provider(config.provider.clone()));

    let generated = service
        .generate(&opts.topic, opts.slides, opts.depth, opts.notes.as_deref())
        .await;
    print!("{}", format_outline(&generated.slides));
    eprintln!(
        "{} slide(s) from {}",
        generated.slides.len(),
        generated.source
    );

    let Some(path) = opts.pptx else {
        return Ok(());
    };

    let mut slides = generated.slides;
    if opts.images && config.images.enabled {
        let images = PollinationsProvider::new(config.images.base_url.clone());
        attach_images(&mut slides, &images).await;
    }

    let theme = Theme::for_style(&opts.style, background);
    let deck = render::render_deck(&slides, &theme, opts.depth)?;
    std::fs::copy(deck.path(), &path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {} ({} slides)", path.display(), deck.slide_count);
    Ok(())
}

/// Outline text in the same `Slide N:` / `- bullet` shape the parser reads.
pub fn format_outline(slides: &[SlideSpec]) -> String {
    let mut out = String::new();
    for (i, slide) in slides.iter().enumerate() {
        out.push_str(&format!("Slide {}: {}\n", i + 1, slide.title));
        for bullet in &slide.bullets {
            out.push_str(&format!("- {bullet}\n"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_core::outline::parse_outline;

    #[test]
    fn formatted_outline_parses_back() {
        let slides = vec![
            SlideSpec::new(
                "Market Overview",
                vec![
                    "Demand grew steadily".to_string(),
                    "Prices fell sharply".to_string(),
                    "New entrants arrived".to_string(),
                ],
            ),
            SlideSpec::new(
                "Outlook",
                vec![
                    "Growth continues next year".to_string(),
                    "Margins stay under pressure".to_string(),
                    "Consolidation is likely".to_string(),
                ],
            ),
        ];
        let text = format_outline(&slides);
        assert!(text.starts_with("Slide 1: Market Overview\n- Demand grew steadily\n"));
        assert_eq!(parse_outline(&text, ContentDepth::Basic, 2), slides);
    }
}
