//! Colour themes and font-size heuristics.

use std::fmt;

use deckgen_db::models::ContentDepth;
use thiserror::Error;

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parse `#RGB` or `#RRGGBB` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(ColorParseError(s.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Perceived brightness on a 0-255 scale.
    pub fn brightness(self) -> u32 {
        (299 * u32::from(self.0) + 587 * u32::from(self.1) + 114 * u32::from(self.2)) / 1000
    }

    pub fn is_dark(self) -> bool {
        self.brightness() < 128
    }
}

/// Upper-case `RRGGBB`, as DrawingML `srgbClr` expects.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid colour {0:?} (expected #RGB or #RRGGBB)")]
pub struct ColorParseError(pub String);

/// Colours for one deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub title: Rgb,
    pub bullet: Rgb,
    pub accent: Rgb,
}

impl Theme {
    /// Pick a palette for `style` that contrasts with `background`.
    ///
    /// Dark backgrounds always get the light palette; otherwise styles
    /// starting with `pink` get the pink palette and everything else blue.
    pub fn for_style(style: &str, background: Rgb) -> Self {
        let (title, bullet, accent) = if background.is_dark() {
            (Rgb(255, 255, 255), Rgb(240, 240, 240), Rgb(100, 150, 255))
        } else if style.trim().to_lowercase().starts_with("pink") {
            (Rgb(150, 30, 80), Rgb(60, 40, 50), Rgb(200, 80, 150))
        } else {
            (Rgb(10, 50, 120), Rgb(30, 30, 50), Rgb(80, 130, 255))
        };
        Self {
            background,
            title,
            bullet,
            accent,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_style("Blue-Professional", Rgb::WHITE)
    }
}

// ---------------------------------------------------------------------------
// Font heuristics (points)
// ---------------------------------------------------------------------------

/// Title-slide heading size; longer titles shrink.
pub fn title_slide_font(title: &str) -> u32 {
    match title.chars().count() {
        n if n > 60 => 28,
        n if n > 40 => 32,
        n if n > 25 => 36,
        _ => 44,
    }
}

/// Content-slide heading size.
pub fn content_title_font(title: &str) -> u32 {
    match title.chars().count() {
        n if n > 50 => 20,
        n if n > 35 => 22,
        n if n > 20 => 24,
        _ => 28,
    }
}

/// Bullet size: one point smaller for long bullets, base size by depth.
pub fn bullet_font(depth: ContentDepth, bullet: &str) -> u32 {
    let len = bullet.chars().count();
    let (threshold, long, short) = match depth {
        ContentDepth::Comprehensive => (80, 14, 15),
        ContentDepth::Detailed => (60, 16, 17),
        ContentDepth::Basic => (40, 18, 19),
    };
    if len > threshold { long } else { short }
}

/// Paragraph spacing `(before, after)` in points.
pub fn bullet_spacing(depth: ContentDepth) -> (u32, u32) {
    match depth {
        ContentDepth::Comprehensive => (2, 4),
        ContentDepth::Detailed => (3, 6),
        ContentDepth::Basic => (4, 8),
    }
}
