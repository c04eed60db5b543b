// Report rendering: analysis + profile in, PDF bytes out.
// CPU-bound; callers on the async runtime must run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

use bytes::Bytes;
use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::models::{CareerAnalysisResult, UserProfile};
use layout::{a4_page_config, compose_report, paginate, PageConfig};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

/// Date-stamped download name, e.g. `career-analysis-2026-03-05.pdf`.
pub fn report_filename(date: NaiveDate) -> String {
    format!("career-analysis-{}.pdf", date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone)]
pub struct PdfReportRenderer {
    page: PageConfig,
}

impl Default for PdfReportRenderer {
    fn default() -> Self {
        Self::new(a4_page_config())
    }
}

impl PdfReportRenderer {
    pub fn new(page: PageConfig) -> Self {
        Self { page }
    }

    /// Renders the report stamped with today's local date.
    pub fn render(
        &self,
        result: &CareerAnalysisResult,
        profile: &UserProfile,
    ) -> Result<Bytes, RenderError> {
        self.render_on(result, profile, Local::now().date_naive())
    }

    pub fn render_on(
        &self,
        result: &CareerAnalysisResult,
        profile: &UserProfile,
        generated_on: NaiveDate,
    ) -> Result<Bytes, RenderError> {
        let blocks = compose_report(result, profile, generated_on);
        let pages = paginate(&blocks, &self.page);
        let bytes = pdf::write_pdf(&pages, &self.page)?;
        debug!("Rendered report: {} pages, {} bytes", pages.len(), bytes.len());
        Ok(Bytes::from(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CareerPath, Education, LearningRoadmap};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ada".to_string(),
            skills: vec!["Python".to_string()],
            education: Education {
                degree: "BS".to_string(),
                field: "CS".to_string(),
                year_completed: 2020,
                certifications: vec![],
            },
            career_goals: vec!["ML Engineer".to_string()],
        }
    }

    fn result() -> CareerAnalysisResult {
        CareerAnalysisResult {
            recommended_paths: vec![CareerPath {
                title: "Machine Learning Engineer".to_string(),
                required_skills: vec!["Python".to_string(), "Statistics".to_string()],
                recommended_certifications: vec![],
                description: "Builds production models".to_string(),
                average_salary: 120000.0,
                job_market_outlook: "Strong".to_string(),
            }],
            skill_gaps: vec!["Statistics".to_string()],
            recommended_courses: vec!["Intro to ML".to_string()],
            learning_roadmap: LearningRoadmap {
                steps: vec![],
                estimated_time_in_months: 6,
            },
        }
    }

    #[test]
    fn test_report_filename_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(report_filename(date), "career-analysis-2026-03-05.pdf");
    }

    #[test]
    fn test_render_produces_pdf_with_report_text() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let bytes = PdfReportRenderer::default()
            .render_on(&result(), &profile(), date)
            .unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("Ada"), "extracted: {text}");
        assert!(text.contains("Statistics"), "extracted: {text}");
    }

    #[test]
    fn test_render_empty_result_is_single_page() {
        let bytes = PdfReportRenderer::default()
            .render(&CareerAnalysisResult::default(), &profile())
            .unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
