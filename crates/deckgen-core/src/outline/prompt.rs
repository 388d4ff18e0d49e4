//! Outline prompt construction.
//!
//! Builds the instruction text sent to the text provider. The requested
//! structure mirrors the grammar [`super::parse_outline`] accepts. This
//! module contains pure logic (no I/O).

use deckgen_db::models::ContentDepth;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs to [`render_prompt`].
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    pub topic: &'a str,
    pub slides: usize,
    pub depth: ContentDepth,
    /// Free-form presenter notes; appended when non-empty.
    pub notes: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Depth-specific sections
// ---------------------------------------------------------------------------

/// Output grammar shared by every depth.
const FORMAT_RULES: &str = "\
- Each slide must start with \"Slide X: [Title]\"
- Use bullet points starting with \"-\"
- Separate slides with one blank line
- Ensure each bullet point is COMPLETE and doesn't get cut off
";

const BASIC_GUIDANCE: &str = "\
- Create SHORT, CLEAR titles (max 8-10 words)
- Focus on fundamental concepts and key takeaways
- Use simple, clear language suitable for beginners
- Make each slide UNIQUE with different content
";

const DETAILED_GUIDANCE: &str = "\
- Create CONCISE, MEANINGFUL titles (max 10-12 words)
- Include analysis, examples, and practical applications
- Provide deeper insights and strategic considerations
- Make each slide UNIQUE with different perspectives
";

const COMPREHENSIVE_GUIDANCE: &str = "\
- Create FOCUSED, STRATEGIC titles (max 12-15 words)
- Include data-driven insights and strategic frameworks
- Cover financial implications and long-term impact
- Make titles CLEAR and COMPLETE - no truncation
- Ensure VARIED content across slides - no repetition
";

fn guidance(depth: ContentDepth) -> &'static str {
    match depth {
        ContentDepth::Basic => BASIC_GUIDANCE,
        ContentDepth::Detailed => DETAILED_GUIDANCE,
        ContentDepth::Comprehensive => COMPREHENSIVE_GUIDANCE,
    }
}

fn framing(depth: ContentDepth) -> (&'static str, &'static str) {
    match depth {
        ContentDepth::Basic => (
            "a concise PowerPoint presentation outline",
            "Focus on foundational knowledge.",
        ),
        ContentDepth::Detailed => (
            "a detailed professional PowerPoint presentation outline",
            "Provide comprehensive analysis.",
        ),
        ContentDepth::Comprehensive => (
            "an executive-level comprehensive PowerPoint presentation",
            "Provide executive-level strategic insights with NO CONTENT REPETITION.",
        ),
    }
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// Render the generation prompt for a topic, slide count and depth.
pub fn render_prompt(req: &PromptRequest<'_>) -> String {
    let bullets = req.depth.target_bullet_count();
    let (lo, hi) = req.depth.word_band();
    let (kind, closing) = framing(req.depth);
    let n = req.slides;

    let mut prompt = String::with_capacity(2048);

    prompt.push_str(&format!(
        "Create {kind} about \"{}\" with EXACTLY {n} slides.\n\n",
        req.topic
    ));

    prompt.push_str("CRITICAL REQUIREMENTS:\n");
    prompt.push_str(&format!(
        "- Generate EXACTLY {n} slides - no more, no less\n"
    ));
    prompt.push_str(FORMAT_RULES);
    prompt.push_str(&format!(
        "- Include EXACTLY {bullets} bullet points per slide\n"
    ));
    prompt.push_str(&format!("- Each bullet should be {lo}-{hi} words\n"));
    prompt.push_str(guidance(req.depth));
    prompt.push('\n');

    prompt.push_str(&format!(
        "{} SLIDE STRUCTURE - EXACTLY {n} SLIDES:\n",
        req.depth.label().to_uppercase()
    ));
    for i in 1..=n.min(2) {
        prompt.push_str(&format!("Slide {i}: [Title]\n"));
        for _ in 0..bullets {
            prompt.push_str(&format!("- [{lo}-{hi} word point]\n"));
        }
        prompt.push('\n');
    }

    if let Some(notes) = req.notes.map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str("ADDITIONAL NOTES FROM THE PRESENTER:\n");
        prompt.push_str(notes);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&format!(
        "Continue this pattern for exactly {n} slides total. {closing}\n"
    ));

    prompt
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
