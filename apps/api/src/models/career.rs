use serde::{Deserialize, Serialize};

/// A single recommended career path. Paths are ranked, most relevant first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub title: String,
    pub required_skills: Vec<String>,
    pub recommended_certifications: Vec<String>,
    pub description: String,
    /// Currency-scale, never negative.
    pub average_salary: f64,
    pub job_market_outlook: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    pub title: String,
    pub description: String,
    pub resources: Vec<String>,
    pub estimated_time_in_weeks: u32,
}

/// Steps are in execution order.
///
/// `estimated_time_in_months` is the model's own advisory figure and is not
/// reconciled against the sum of step weeks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningRoadmap {
    pub steps: Vec<LearningStep>,
    pub estimated_time_in_months: u32,
}

/// The validated analysis returned to callers. Always structurally complete:
/// every list is present (possibly empty) and every scalar has a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAnalysisResult {
    pub recommended_paths: Vec<CareerPath>,
    pub skill_gaps: Vec<String>,
    pub recommended_courses: Vec<String>,
    pub learning_roadmap: LearningRoadmap,
}
