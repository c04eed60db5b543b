//! Report layout: turns an analysis into positioned lines of text on pages.
//!
//! Two passes: `compose_report` produces styled blocks in reading order,
//! `paginate` wraps them to the content width and flows them onto pages,
//! then stamps a "Page i of n" footer on each page.
//! Coordinates are PDF points with the origin at the bottom-left corner.

use chrono::NaiveDate;

use crate::models::{CareerAnalysisResult, UserProfile};
use crate::report::font_metrics::{get_metrics, FontFace};

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
    /// Line height as a multiple of font size.
    pub line_spacing: f32,
    /// Space reserved above the bottom margin for the footer.
    pub footer_height_pt: f32,
}

impl PageConfig {
    pub fn content_width_pt(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }
}

/// A4 with 2 cm margins.
pub fn a4_page_config() -> PageConfig {
    PageConfig {
        width_pt: 595.0,
        height_pt: 842.0,
        margin_pt: 56.7,
        line_spacing: 1.35,
        footer_height_pt: 24.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Subtitle,
    Heading,
    Strong,
    Body,
    Footer,
}

impl TextStyle {
    pub fn face(self) -> FontFace {
        match self {
            TextStyle::Title | TextStyle::Heading | TextStyle::Strong => FontFace::HelveticaBold,
            TextStyle::Subtitle | TextStyle::Body | TextStyle::Footer => FontFace::Helvetica,
        }
    }

    pub fn size_pt(self) -> f32 {
        match self {
            TextStyle::Title => 20.0,
            TextStyle::Heading => 16.0,
            TextStyle::Strong | TextStyle::Body => 11.0,
            TextStyle::Subtitle | TextStyle::Footer => 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub style: TextStyle,
    pub text: String,
    pub indent_pt: f32,
    pub space_before_pt: f32,
}

impl Block {
    fn new(style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            indent_pt: 0.0,
            space_before_pt: 0.0,
        }
    }

    fn indented(mut self, indent_pt: f32) -> Self {
        self.indent_pt = indent_pt;
        self
    }

    fn spaced(mut self, space_before_pt: f32) -> Self {
        self.space_before_pt = space_before_pt;
        self
    }
}

const SECTION_GAP: f32 = 14.0;
const ITEM_GAP: f32 = 8.0;
const ITEM_INDENT: f32 = 12.0;

/// "$120,000": whole currency units with thousands separators.
pub fn format_salary(amount: f64) -> String {
    let whole = amount.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${grouped}")
}

/// Builds the report content in reading order.
pub fn compose_report(
    result: &CareerAnalysisResult,
    profile: &UserProfile,
    generated_on: NaiveDate,
) -> Vec<Block> {
    let mut blocks = vec![
        Block::new(TextStyle::Title, "Career Path Analysis Report"),
        Block::new(
            TextStyle::Subtitle,
            format!("Generated on {}", generated_on.format("%-d %B %Y")),
        ),
    ];

    blocks.push(Block::new(TextStyle::Heading, "User Profile").spaced(SECTION_GAP));
    blocks.push(Block::new(TextStyle::Body, format!("Name: {}", profile.name)));
    blocks.push(Block::new(
        TextStyle::Body,
        format!("Skills: {}", profile.skills.join(", ")),
    ));
    blocks.push(Block::new(
        TextStyle::Body,
        format!(
            "Education: {} in {}",
            profile.education.degree, profile.education.field
        ),
    ));
    if !profile.education.certifications.is_empty() {
        blocks.push(Block::new(
            TextStyle::Body,
            format!(
                "Certifications: {}",
                profile.education.certifications.join(", ")
            ),
        ));
    }

    blocks.push(Block::new(TextStyle::Heading, "Recommended Career Paths").spaced(SECTION_GAP));
    for path in &result.recommended_paths {
        blocks.push(
            Block::new(TextStyle::Strong, path.title.as_str())
                .indented(ITEM_INDENT)
                .spaced(ITEM_GAP),
        );
        for line in [
            format!("Description: {}", path.description),
            format!("Required Skills: {}", path.required_skills.join(", ")),
            format!(
                "Recommended Certifications: {}",
                path.recommended_certifications.join(", ")
            ),
            format!("Average Salary: {}", format_salary(path.average_salary)),
            format!("Job Market Outlook: {}", path.job_market_outlook),
        ] {
            blocks.push(Block::new(TextStyle::Body, line).indented(ITEM_INDENT));
        }
    }

    blocks.push(Block::new(TextStyle::Heading, "Skill Gaps").spaced(SECTION_GAP));
    blocks.push(Block::new(TextStyle::Body, result.skill_gaps.join(", ")));

    let roadmap = &result.learning_roadmap;
    blocks.push(Block::new(TextStyle::Heading, "Learning Roadmap").spaced(SECTION_GAP));
    blocks.push(Block::new(
        TextStyle::Body,
        format!(
            "Estimated Duration: {} months",
            roadmap.estimated_time_in_months
        ),
    ));
    for step in &roadmap.steps {
        blocks.push(
            Block::new(TextStyle::Strong, step.title.as_str())
                .indented(ITEM_INDENT)
                .spaced(ITEM_GAP),
        );
        blocks.push(Block::new(TextStyle::Body, step.description.as_str()).indented(ITEM_INDENT));
        blocks.push(
            Block::new(
                TextStyle::Body,
                format!("Resources: {}", step.resources.join(", ")),
            )
            .indented(ITEM_INDENT),
        );
        blocks.push(
            Block::new(
                TextStyle::Body,
                format!("Estimated Time: {} weeks", step.estimated_time_in_weeks),
            )
            .indented(ITEM_INDENT),
        );
    }

    blocks.push(Block::new(TextStyle::Heading, "Recommended Courses").spaced(SECTION_GAP));
    for course in &result.recommended_courses {
        blocks.push(Block::new(TextStyle::Body, format!("\u{2022} {course}")));
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub style: TextStyle,
    pub text: String,
    /// Baseline start, in points from the bottom-left corner.
    pub x_pt: f32,
    pub y_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Wraps and flows blocks onto pages. Always returns at least one page.
pub fn paginate(blocks: &[Block], config: &PageConfig) -> Vec<PageLayout> {
    let top = config.height_pt - config.margin_pt;
    let floor = config.margin_pt + config.footer_height_pt;

    let mut pages = Vec::new();
    let mut current = PageLayout::default();
    let mut cursor = top;

    for block in blocks {
        let metrics = get_metrics(block.style.face());
        let size = block.style.size_pt();
        let line_height = size * config.line_spacing;
        let max_width_em = (config.content_width_pt() - block.indent_pt) / size;

        if cursor < top {
            cursor -= block.space_before_pt;
        }

        for text in metrics.wrap(&block.text, max_width_em) {
            if cursor - line_height < floor {
                pages.push(std::mem::take(&mut current));
                cursor = top;
            }
            cursor -= line_height;
            current.lines.push(PlacedLine {
                style: block.style,
                text,
                x_pt: config.margin_pt + block.indent_pt,
                // Baseline sits above the bottom of the line box by the descent.
                y_pt: cursor + (line_height - size) / 2.0 + size * 0.2,
            });
        }
    }

    pages.push(current);

    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        let text = format!("Page {} of {}", i + 1, total);
        let style = TextStyle::Footer;
        let width = get_metrics(style.face()).measure_str(&text) * style.size_pt();
        page.lines.push(PlacedLine {
            style,
            x_pt: (config.width_pt - width) / 2.0,
            y_pt: config.margin_pt,
            text,
        });
    }

    pages
}
