//! Outline text parser.
//!
//! Turns loosely-structured outline text into [`SlideSpec`]s:
//! - Blocks are separated by blank lines.
//! - The first line of a block is the title (`Slide N:` prefix optional).
//! - Remaining lines are bullets (`-`, `•`, `*` or `·` prefix optional).
//! - Every accepted slide is normalized to the depth's exact bullet count.

use std::sync::LazyLock;

use deckgen_db::models::ContentDepth;
use regex::Regex;
use tracing::{debug, warn};

use super::slide::SlideSpec;

/// Separator between slide blocks: a newline, optional whitespace-only
/// lines, and another newline.
pub const BLOCK_SEPARATOR: &str = r"\n\s*\n";

/// Leading `Slide <digits>:` marker stripped from title lines.
pub const TITLE_MARKER: &str = r"(?i)^Slide\s*\d+:\s*";

/// Looser title pattern used when the strict strip leaves almost nothing.
pub const LOOSE_TITLE: &str = r"(?i)^(?:Slide\s*\d+[:.]?\s*)?(.+)$";

/// Primary bullet marker: a dash only counts when whitespace follows it.
pub const DASH_MARKER: &str = r"^-\s+";

/// Alternative bullet markers; only the marker character itself is removed.
pub const ALT_MARKERS: [char; 3] = ['•', '*', '·'];

/// Bullets shorter than this many characters are treated as noise.
pub const MIN_BULLET_CHARS: usize = 6;

/// Titles shorter than this many characters trigger the loose title pattern.
const MIN_TITLE_CHARS: usize = 2;

/// Prefix of the synthetic bullets used to pad under-filled slides.
pub const PLACEHOLDER_PREFIX: &str = "Additional strategic consideration for";

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| compile(BLOCK_SEPARATOR));
static TITLE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| compile(TITLE_MARKER));
static LOOSE_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| compile(LOOSE_TITLE));
static DASH_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| compile(DASH_MARKER));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("outline grammar patterns are valid")
}

/// Parse outline text into at most `requested_slides` slides.
///
/// Never fails: empty input, or input with no usable block, yields an empty
/// vector, which callers treat as the signal to fall back.
pub fn parse_outline(text: &str, depth: ContentDepth, requested_slides: usize) -> Vec<SlideSpec> {
    let text = text.trim();
    if text.is_empty() {
        debug!("empty outline text");
        return Vec::new();
    }

    let target = depth.target_bullet_count();
    let mut slides = Vec::with_capacity(requested_slides.min(32));

    for block in BLOCK_RE.split(text) {
        if slides.len() >= requested_slides {
            break;
        }
        if let Some(slide) = parse_block(block, target) {
            slides.push(slide);
        }
    }

    if slides.len() < requested_slides {
        debug!(
            parsed = slides.len(),
            requested = requested_slides,
            "outline produced fewer slides than requested"
        );
    }

    slides.truncate(requested_slides);
    slides
}

/// Parse a single block, returning `None` when it has no title or no bullet
/// survives filtering.
fn parse_block(block: &str, target: usize) -> Option<SlideSpec> {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());

    let title = extract_title(lines.next()?)?;

    let mut bullets: Vec<String> = lines.filter_map(extract_bullet).collect();
    if bullets.is_empty() {
        return None;
    }

    if bullets.len() < target {
        warn!(
            title = %title,
            found = bullets.len(),
            expected = target,
            "padding under-filled slide"
        );
        let placeholder = placeholder_bullet(&title);
        bullets.resize(target, placeholder);
    } else {
        bullets.truncate(target);
    }

    Some(SlideSpec::new(title, bullets))
}

/// Title extraction: strict marker strip first, loose pattern as a fallback.
fn extract_title(line: &str) -> Option<String> {
    let strict = TITLE_MARKER_RE.replace(line, "");
    let strict = strict.trim();
    if strict.chars().count() >= MIN_TITLE_CHARS {
        return Some(strict.to_string());
    }

    let loose = LOOSE_TITLE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or("");

    if loose.is_empty() {
        None
    } else {
        Some(loose.to_string())
    }
}

/// Strip a bullet marker and normalize whitespace. Returns `None` for lines
/// too short to be content.
///
/// Length is measured before whitespace is collapsed.
fn extract_bullet(line: &str) -> Option<String> {
    let content = if let Some(m) = DASH_MARKER_RE.find(line) {
        &line[m.end()..]
    } else if let Some(rest) = line.strip_prefix(ALT_MARKERS) {
        rest
    } else {
        line
    };

    let content = content.trim();
    if content.chars().count() < MIN_BULLET_CHARS {
        return None;
    }
    Some(content.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Synthetic bullet used to pad a slide with too few bullets.
pub fn placeholder_bullet(title: &str) -> String {
    format!("{PLACEHOLDER_PREFIX} {}", title.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(slides: &[SlideSpec]) -> Vec<&str> {
        slides.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        for depth in ContentDepth::ALL {
            assert!(parse_outline("", depth, 5).is_empty());
            assert!(parse_outline("   \n\n\t ", depth, 5).is_empty());
        }
    }

    #[test]
    fn strips_slide_marker_from_title() {
        let text = "Slide 3: Market Overview\n- Growing demand across regions\n- Pricing pressure from imports\n- Consolidation among suppliers";
        let slides = parse_outline(text, ContentDepth::Basic, 5);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Market Overview");
    }

    #[test]
    fn marker_is_case_insensitive_and_spacing_tolerant() {
        let text = "SLIDE12:   Roadmap\n- Quarter one milestones\n- Quarter two milestones\n- Quarter three review";
        let slides = parse_outline(text, ContentDepth::Basic, 5);
        assert_eq!(titles(&slides), vec!["Roadmap"]);
    }

    #[test]
    fn bare_marker_title_falls_back_to_loose_pattern() {
        // Strict strip leaves nothing; the loose pattern keeps the colon.
        let text = "Slide 2:\n- First meaningful bullet\n- Second meaningful bullet\n- Third meaningful bullet";
        let slides = parse_outline(text, ContentDepth::Basic, 5);
        assert_eq!(titles(&slides), vec![":"]);
    }

    #[test]
    fn truncates_excess_bullets_to_target() {
        let text = "Intro\n- one bullet here\n- two bullet here\n- three bullet here\n- four bullet here\n- five bullet here\n- six bullet here";
        for depth in ContentDepth::ALL {
            let slides = parse_outline(text, depth, 1);
            assert_eq!(slides[0].bullets.len(), depth.target_bullet_count());
            assert_eq!(slides[0].bullets[0], "one bullet here");
        }
    }

    #[test]
    fn pads_under_filled_slide_with_placeholders() {
        let text = "Risks\n- Supply chain disruption\n- Regulatory uncertainty";
        let slides = parse_outline(text, ContentDepth::Detailed, 3);
        assert_eq!(slides.len(), 1);
        let bullets = &slides[0].bullets;
        assert_eq!(bullets.len(), 4);
        assert_eq!(bullets[0], "Supply chain disruption");
        assert_eq!(bullets[1], "Regulatory uncertainty");
        assert_eq!(bullets[2], "Additional strategic consideration for risks");
        assert_eq!(bullets[3], "Additional strategic consideration for risks");
    }

    #[test]
    fn alternative_markers_match_dash() {
        let dash = "Topic\n- alpha bullet text\n- beta bullet text\n- gamma bullet text";
        let dot = "Topic\n• alpha bullet text\n* beta bullet text\n· gamma bullet text";
        let a = parse_outline(dash, ContentDepth::Basic, 1);
        let b = parse_outline(dot, ContentDepth::Basic, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn unmarked_lines_are_bullets_too() {
        let text = "Topic\nplain line of content\nanother plain line\nthird plain line";
        let slides = parse_outline(text, ContentDepth::Basic, 1);
        assert_eq!(slides[0].bullets[2], "third plain line");
    }

    #[test]
    fn discards_block_without_usable_bullets() {
        let text = "Noise\n- ok\n- tiny\n* abc\n\nReal\n- an actual bullet\n- another actual one\n- and a third one";
        let slides = parse_outline(text, ContentDepth::Basic, 5);
        assert_eq!(titles(&slides), vec!["Real"]);
    }

    #[test]
    fn discards_title_only_block() {
        let slides = parse_outline("Lonely Title", ContentDepth::Detailed, 5);
        assert!(slides.is_empty());
    }

    #[test]
    fn collapses_internal_whitespace() {
        let text = "T1\n-   spaced    out\t\tbullet   text";
        let slides = parse_outline(text, ContentDepth::Basic, 1);
        assert_eq!(slides[0].bullets[0], "spaced out bullet text");
    }

    #[test]
    fn dash_without_space_is_content() {
        let text = "T1\n-5% revenue decline\n- real bullet one\n- real bullet two";
        let slides = parse_outline(text, ContentDepth::Basic, 1);
        assert_eq!(
            slides[0].bullets,
            vec!["-5% revenue decline", "real bullet one", "real bullet two"]
        );
    }

    #[test]
    fn length_counts_whitespace_before_collapse() {
        let text = "T1\n- ab    cd\n- real bullet one\n- real bullet two";
        let slides = parse_outline(text, ContentDepth::Basic, 1);
        assert_eq!(
            slides[0].bullets,
            vec!["ab cd", "real bullet one", "real bullet two"]
        );
    }

    #[test]
    fn never_exceeds_requested_count() {
        let block = "Title\n- bullet number one\n- bullet number two\n- bullet number three";
        let text = vec![block; 10].join("\n\n");
        for n in 0..12 {
            let slides = parse_outline(&text, ContentDepth::Basic, n);
            assert_eq!(slides.len(), n.min(10));
        }
    }

    #[test]
    fn tolerates_whitespace_only_separator_lines_and_crlf() {
        let text = "One\r\n- first slide bullet\r\n  \t\r\nTwo\r\n- second slide bullet";
        let slides = parse_outline(text, ContentDepth::Basic, 5);
        assert_eq!(titles(&slides), vec!["One", "Two"]);
        assert_eq!(slides[1].bullets[0], "second slide bullet");
    }

    #[test]
    fn every_accepted_slide_has_exact_count() {
        let text = "A\n- only one bullet\n\nB\n- b1 bullet\n- b2 bullet\n- b3 bullet\n- b4 bullet\n- b5 bullet\n- b6 bullet\n\nC\n- c1 bullet\n- c2 bullet";
        for depth in ContentDepth::ALL {
            for slide in parse_outline(text, depth, 10) {
                assert_eq!(slide.bullets.len(), depth.target_bullet_count());
                assert!(slide.image.is_none());
            }
        }
    }
}
