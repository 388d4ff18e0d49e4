use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How much content each slide carries.
///
/// The depth fixes the exact number of bullets per slide and the word-length
/// band the generation prompt asks for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentDepth {
    Basic,
    #[default]
    Detailed,
    Comprehensive,
}

impl ContentDepth {
    /// Every depth, in ascending order of verbosity.
    pub const ALL: [ContentDepth; 3] = [Self::Basic, Self::Detailed, Self::Comprehensive];

    /// Exact bullet count every finalized slide of this depth carries.
    pub fn target_bullet_count(self) -> usize {
        match self {
            Self::Basic => 3,
            Self::Detailed => 4,
            Self::Comprehensive => 5,
        }
    }

    /// Inclusive word-count band requested for each bullet.
    pub fn word_band(self) -> (u32, u32) {
        match self {
            Self::Basic => (5, 7),
            Self::Detailed => (8, 12),
            Self::Comprehensive => (12, 18),
        }
    }

    /// Capitalized label, e.g. `"Detailed"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Detailed => "Detailed",
            Self::Comprehensive => "Comprehensive",
        }
    }

    /// One-line description served by the depth listing endpoint.
    pub fn description(self) -> String {
        let (lo, hi) = self.word_band();
        let focus = match self {
            Self::Basic => "Foundational concepts",
            Self::Detailed => "Strategic analysis",
            Self::Comprehensive => "Executive insights",
        };
        format!(
            "{} ({} bullets, {lo}-{hi} words each) - {focus}",
            self.label(),
            self.target_bullet_count()
        )
    }
}

impl fmt::Display for ContentDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Basic => "basic",
            Self::Detailed => "detailed",
            Self::Comprehensive => "comprehensive",
        };
        f.write_str(s)
    }
}

impl FromStr for ContentDepth {
    type Err = ContentDepthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "detailed" => Ok(Self::Detailed),
            "comprehensive" => Ok(Self::Comprehensive),
            _ => Err(ContentDepthParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ContentDepth`] string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid content depth: {0:?} (expected basic, detailed, or comprehensive)")]
pub struct ContentDepthParseError(pub String);

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One generation-history entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Presentation {
    pub id: Uuid,
    pub topic: String,
    /// Number of content slides actually produced.
    pub slides: i32,
    pub style: String,
    pub background_color: String,
    pub include_images: bool,
    pub content_depth: ContentDepth,
    pub created_at: DateTime<Utc>,
    pub downloaded: bool,
    pub download_count: i32,
}

/// Aggregate counters for the metrics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_downloads: i64,
    pub total_presentations: i64,
    pub downloaded_presentations: i64,
    pub content_depth_distribution: BTreeMap<String, i64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
