//! Deterministic outline text used when the text provider cannot deliver.
//!
//! The output uses the same grammar [`super::parse_outline`] accepts, so
//! parsing it back for the same depth and count is lossless.

use deckgen_db::models::ContentDepth;
use tracing::info;

use super::slide::SlideSpec;

/// Placeholder replaced with the (whitespace-collapsed) topic.
const TOPIC: &str = "{topic}";

struct TemplateSlide {
    title: &'static str,
    bullets: &'static [&'static str],
}

const BASIC_BANK: &[TemplateSlide] = &[
    TemplateSlide {
        title: "Introduction & Overview: {topic}",
        bullets: &[
            "Core concept definition and basic overview of {topic}",
            "Main purpose explanation and primary applications",
            "Key benefits summary and importance assessment",
        ],
    },
    TemplateSlide {
        title: "Fundamental Concepts & Principles",
        bullets: &[
            "Primary principles explanation and supporting concepts",
            "Basic functionality overview and key features",
            "Simple examples demonstration and use cases",
        ],
    },
    TemplateSlide {
        title: "Practical Applications & Use Cases",
        bullets: &[
            "Implementation approach and basic requirements",
            "Common use cases and application scenarios",
            "Success factors and best practices summary",
        ],
    },
    TemplateSlide {
        title: "Key Benefits & Competitive Advantages",
        bullets: &[
            "Primary advantages and competitive benefits",
            "Efficiency improvements and cost savings",
            "User experience enhancements and value creation",
        ],
    },
    TemplateSlide {
        title: "Implementation Steps & Requirements",
        bullets: &[
            "Initial setup and configuration requirements",
            "Deployment process and timeline overview",
            "Training needs and user adoption strategy",
        ],
    },
    TemplateSlide {
        title: "Summary & Next Steps",
        bullets: &[
            "Key takeaways and main points summary",
            "Recommended actions and implementation priorities",
            "Future considerations and expansion opportunities",
        ],
    },
];

const DETAILED_BANK: &[TemplateSlide] = &[
    TemplateSlide {
        title: "Strategic Analysis Overview: {topic}",
        bullets: &[
            "Comprehensive analysis of {topic} market position and competitive landscape",
            "Key industry trends assessment and emerging opportunity identification",
            "Strategic importance evaluation and business impact considerations",
            "Implementation challenges overview and solution framework development",
        ],
    },
    TemplateSlide {
        title: "Technical Framework & Architecture",
        bullets: &[
            "Technical architecture overview and component relationships mapping",
            "Methodology explanation and implementation best practices",
            "Case study analysis with real-world application examples",
            "Performance metrics definition and success measurement criteria",
        ],
    },
    TemplateSlide {
        title: "Implementation Strategy & Planning",
        bullets: &[
            "Phased implementation approach with timeline and milestone planning",
            "Resource allocation strategy and team structure recommendations",
            "Risk assessment framework with mitigation strategy development",
            "Success metrics tracking and continuous improvement framework",
        ],
    },
    TemplateSlide {
        title: "Market Analysis & Competitive Positioning",
        bullets: &[
            "Target market segmentation and customer needs analysis",
            "Competitive landscape assessment and differentiation strategy",
            "Market opportunity sizing and growth potential evaluation",
            "Strategic positioning and value proposition development",
        ],
    },
    TemplateSlide {
        title: "Operational Excellence & Efficiency",
        bullets: &[
            "Process optimization and efficiency improvement initiatives",
            "Quality management and performance monitoring systems",
            "Resource utilization and capacity planning strategies",
            "Continuous improvement and innovation implementation",
        ],
    },
    TemplateSlide {
        title: "Future Outlook & Strategic Recommendations",
        bullets: &[
            "Emerging trends analysis and future market developments",
            "Strategic recommendations and implementation priorities",
            "Long-term vision and growth opportunity identification",
            "Next steps and action plan for immediate execution",
        ],
    },
];

const COMPREHENSIVE_BANK: &[TemplateSlide] = &[
    TemplateSlide {
        title: "Executive Strategic Overview: {topic}",
        bullets: &[
            "Comprehensive market analysis of {topic} with current industry trends and competitive landscape assessment",
            "Strategic business case development with detailed ROI calculation, financial projections, and investment justification",
            "Implementation roadmap detailing phased approach, resource allocation strategy, and milestone tracking",
            "Stakeholder impact analysis covering organizational change management, training requirements, and communication strategy",
            "Performance measurement framework defining KPIs, success metrics, and continuous improvement processes",
        ],
    },
    TemplateSlide {
        title: "Technical Architecture & Innovation Strategy",
        bullets: &[
            "Technical infrastructure design including scalability considerations, integration points, and future-proofing strategies",
            "Innovation adoption framework covering emerging technologies, partnership opportunities, and competitive advantage positioning",
            "Data analytics implementation with business intelligence tools, predictive modeling, and real-time dashboard development",
            "Security and compliance framework addressing regulatory requirements, data protection, and risk management protocols",
            "Change management strategy detailing organizational transformation, training programs, and cultural adoption measurement",
        ],
    },
    TemplateSlide {
        title: "Financial Analysis & Business Impact Assessment",
        bullets: &[
            "Detailed financial modeling including revenue projections, cost analysis, break-even calculation, and sensitivity analysis",
            "Investment justification framework covering capital expenditure, operational costs, return on investment timeline, and payback period",
            "Risk assessment matrix identifying operational, financial, technical, and market risks with probability-impact analysis",
            "Stakeholder value proposition detailing benefits for customers, employees, shareholders, and partners",
            "Strategic alignment analysis connecting to organizational goals, competitive positioning, and long-term growth objectives",
        ],
    },
    TemplateSlide {
        title: "Implementation Excellence & Project Management Framework",
        bullets: &[
            "Project management methodology with agile approach, sprint planning, resource allocation, and governance structure",
            "Quality assurance framework covering testing protocols, performance benchmarking, user acceptance criteria, and feedback mechanisms",
            "Team structure and capability development outlining roles, responsibilities, skill requirements, and training programs",
            "Vendor and partnership strategy detailing selection criteria, contract management, performance monitoring, and relationship management",
            "Operational excellence framework covering process optimization, automation opportunities, efficiency metrics, and service level agreements",
        ],
    },
    TemplateSlide {
        title: "Strategic Risk Management & Mitigation Planning",
        bullets: &[
            "Comprehensive risk identification process covering operational, financial, technical, and market-related challenges",
            "Risk assessment methodology using probability-impact matrix and quantitative analysis techniques",
            "Mitigation strategy development with contingency planning and alternative scenario analysis",
            "Monitoring and control framework with early warning indicators and escalation procedures",
            "Business continuity planning ensuring operational resilience and disaster recovery capabilities",
        ],
    },
    TemplateSlide {
        title: "Performance Optimization & Strategic Roadmap",
        bullets: &[
            "Performance benchmarking against industry standards and competitor analysis for continuous improvement",
            "Optimization strategies focusing on efficiency gains, cost reduction, and value enhancement opportunities",
            "Technology roadmap aligning with business strategy and emerging innovation trends",
            "Talent development and capability building programs for sustained competitive advantage",
            "Long-term strategic vision with measurable objectives and milestone tracking mechanisms",
        ],
    },
];

fn bank(depth: ContentDepth) -> &'static [TemplateSlide] {
    match depth {
        ContentDepth::Basic => BASIC_BANK,
        ContentDepth::Detailed => DETAILED_BANK,
        ContentDepth::Comprehensive => COMPREHENSIVE_BANK,
    }
}

/// Number of template slides available for `depth`.
pub fn bank_size(depth: ContentDepth) -> usize {
    bank(depth).len()
}

/// Collapse whitespace runs so a topic can never introduce a block break.
fn normalize_topic(topic: &str) -> String {
    topic.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fill(template: &str, topic: &str) -> String {
    let filled = template.replace(TOPIC, topic);
    filled.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Produce outline text for `min(requested_slides, bank_size(depth))`
/// slides, each carrying exactly `depth.target_bullet_count()` bullets.
pub fn generate_fallback(topic: &str, requested_slides: usize, depth: ContentDepth) -> String {
    let topic = normalize_topic(topic);
    let target = depth.target_bullet_count();
    let templates = bank(depth);
    let count = requested_slides.min(templates.len());

    let mut out = String::new();
    for (i, slide) in templates.iter().take(count).enumerate() {
        out.push_str(&format!("Slide {}: {}\n", i + 1, fill(slide.title, &topic)));
        for bullet in slide.bullets.iter().take(target) {
            out.push_str("- ");
            out.push_str(&fill(bullet, &topic));
            out.push('\n');
        }
        out.push('\n');
    }

    info!(
        topic = %topic,
        slides = count,
        bullets = target,
        depth = %depth,
        "generated fallback outline"
    );
    out
}

/// A single slide that is always valid for `depth`. Last resort when both
/// the provider text and the fallback bank produce nothing.
pub fn minimal_outline(topic: &str, depth: ContentDepth) -> Vec<SlideSpec> {
    let topic = normalize_topic(topic);
    let subject = if topic.is_empty() { "AI Presentation" } else { topic.as_str() };

    let (title, bullets): (String, Vec<&str>) = match depth {
        ContentDepth::Basic => (
            format!("Introduction to {subject}"),
            vec![
                "Core concept overview and basic principles",
                "Main applications and use cases",
                "Key benefits and advantages",
            ],
        ),
        ContentDepth::Detailed => (
            format!("Strategic Analysis of {subject}"),
            vec![
                "Market overview and competitive landscape assessment",
                "Key benefits and implementation considerations",
                "Risk analysis and mitigation strategies",
                "Success metrics and performance tracking",
            ],
        ),
        ContentDepth::Comprehensive => (
            format!("Executive Overview of {subject}"),
            vec![
                "Comprehensive market analysis and strategic positioning",
                "Financial projections and return on investment calculation",
                "Implementation roadmap with resource allocation strategy",
                "Risk assessment and mitigation planning framework",
                "Performance metrics and success measurement criteria",
            ],
        ),
    };

    let bullets = bullets.into_iter().map(str::to_string).collect();
    vec![SlideSpec::new(title, bullets)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::parse_outline;

    #[test]
    fn banks_hold_six_slides_with_enough_bullets() {
        for depth in ContentDepth::ALL {
            assert_eq!(bank_size(depth), 6);
            for slide in bank(depth) {
                assert!(slide.bullets.len() >= depth.target_bullet_count());
            }
        }
    }

    #[test]
    fn round_trips_through_parser() {
        for depth in ContentDepth::ALL {
            for n in 1..=8 {
                let text = generate_fallback("Quantum Computing", n, depth);
                let slides = parse_outline(&text, depth, n);
                assert_eq!(slides.len(), n.min(bank_size(depth)), "depth={depth} n={n}");
                for slide in &slides {
                    assert_eq!(slide.bullets.len(), depth.target_bullet_count());
                }
            }
        }
    }

    #[test]
    fn round_trip_preserves_text() {
        let text = generate_fallback("Ocean Shipping", 2, ContentDepth::Basic);
        let slides = parse_outline(&text, ContentDepth::Basic, 2);
        assert_eq!(slides[0].title, "Introduction & Overview: Ocean Shipping");
        assert_eq!(
            slides[0].bullets[0],
            "Core concept definition and basic overview of Ocean Shipping"
        );
        assert_eq!(slides[1].title, "Fundamental Concepts & Principles");
    }

    #[test]
    fn zero_slides_yields_empty_text() {
        assert!(generate_fallback("anything", 0, ContentDepth::Detailed).is_empty());
    }

    #[test]
    fn emits_slide_markers_and_dash_bullets() {
        let text = generate_fallback("AI", 1, ContentDepth::Comprehensive);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Slide 1: Executive Strategic Overview: AI");
        assert_eq!(lines.iter().filter(|l| l.starts_with("- ")).count(), 5);
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn multiline_topic_cannot_split_blocks() {
        let text = generate_fallback("Solar\n\n  Power", 2, ContentDepth::Detailed);
        let slides = parse_outline(&text, ContentDepth::Detailed, 2);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "Strategic Analysis Overview: Solar Power");
    }

    #[test]
    fn minimal_outline_is_one_valid_slide() {
        for depth in ContentDepth::ALL {
            let slides = minimal_outline("Edge Computing", depth);
            assert_eq!(slides.len(), 1);
            assert_eq!(slides[0].bullets.len(), depth.target_bullet_count());
        }
        assert_eq!(
            minimal_outline("   ", ContentDepth::Basic)[0].title,
            "Introduction to AI Presentation"
        );
    }

    #[test]
    fn minimal_outline_wording_follows_depth() {
        let basic = minimal_outline("Edge Computing", ContentDepth::Basic);
        assert_eq!(basic[0].title, "Introduction to Edge Computing");
        assert_eq!(basic[0].bullets[2], "Key benefits and advantages");

        let detailed = minimal_outline("Edge Computing", ContentDepth::Detailed);
        assert_eq!(detailed[0].title, "Strategic Analysis of Edge Computing");

        let comprehensive = minimal_outline("Edge Computing", ContentDepth::Comprehensive);
        assert_eq!(comprehensive[0].title, "Executive Overview of Edge Computing");
        assert_eq!(
            comprehensive[0].bullets[4],
            "Performance metrics and success measurement criteria"
        );
    }
}
