//! Career analysis pipeline.
//!
//! Flow: build_prompt → model.complete → extract.
//!
//! One attempt per call, no caching: identical profiles submitted twice are two
//! independent model calls. The only suspension point is the model call.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::extractor::{extract, ExtractError};
use crate::analysis::prompts::build_prompt;
use crate::llm_client::{CompletionModel, LlmError};
use crate::models::{CareerAnalysisResult, UserProfile};

/// A pipeline failure, tagged with the stage it came from.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("response extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}

impl AnalysisError {
    pub fn stage(&self) -> &'static str {
        match self {
            AnalysisError::Model(_) => "model_client",
            AnalysisError::Extraction(_) => "response_extractor",
        }
    }
}

/// Runs the analysis pipeline against a shared completion model.
#[derive(Clone)]
pub struct CareerAnalyzer {
    model: Arc<dyn CompletionModel>,
}

impl CareerAnalyzer {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    pub async fn analyze(
        &self,
        profile: &UserProfile,
    ) -> Result<CareerAnalysisResult, AnalysisError> {
        let prompt = build_prompt(profile);
        info!(
            "Analyzing career paths: {} skills, {} goals",
            profile.skills.len(),
            profile.career_goals.len()
        );
        debug!("Prompt built: {} chars", prompt.len());

        let raw = self.model.complete(&prompt).await?;
        debug!("Raw completion: {} chars", raw.len());

        let result = extract(&raw).inspect_err(|e| {
            warn!("Could not extract analysis from completion: {e}");
        })?;

        info!(
            "Analysis complete: {} paths, {} roadmap steps, {} months",
            result.recommended_paths.len(),
            result.learning_roadmap.steps.len(),
            result.learning_roadmap.estimated_time_in_months
        );

        Ok(result)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::Education;

    /// Canned completion model. Replays one response per call and records prompts.
    pub(crate) struct StubModel {
        response: Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>,
        pub prompts: Mutex<Vec<String>>,
        pub calls: AtomicUsize,
    }

    impl StubModel {
        pub fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self::with(move || Ok(text.clone()))
        }

        pub fn with(response: impl Fn() -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
            Self {
                response: Box::new(response),
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for StubModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.response)()
        }
    }

    pub(crate) const ADA_COMPLETION: &str = r#"Sure! {"RecommendedPaths":[{"Title":"ML Engineer","RequiredSkills":["Python","Statistics"],"RecommendedCertifications":[],"Description":"...","AverageSalary":120000,"JobMarketOutlook":"Strong"}],"SkillGaps":["Statistics"],"RecommendedCourses":["Intro to ML"],"LearningRoadmap":{"Steps":[],"EstimatedTimeInMonths":6}}"#;

    pub(crate) fn ada() -> UserProfile {
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

    #[tokio::test]
    async fn test_analyze_returns_extracted_result() {
        let model = Arc::new(StubModel::replying(ADA_COMPLETION));
        let analyzer = CareerAnalyzer::new(model.clone());

        let result = analyzer.analyze(&ada()).await.unwrap();

        assert_eq!(result.recommended_paths.len(), 1);
        assert_eq!(result.recommended_paths[0].title, "ML Engineer");
        assert_eq!(result.recommended_paths[0].average_salary, 120000.0);
        assert_eq!(result.learning_roadmap.estimated_time_in_months, 6);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_sends_built_prompt() {
        let model = Arc::new(StubModel::replying("{}"));
        let analyzer = CareerAnalyzer::new(model.clone());

        analyzer.analyze(&ada()).await.unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), [build_prompt(&ada())]);
    }

    #[tokio::test]
    async fn test_analyze_propagates_service_unavailable() {
        let model = Arc::new(StubModel::with(|| {
            Err(LlmError::ServiceUnavailable("quota exceeded".to_string()))
        }));
        let analyzer = CareerAnalyzer::new(model);

        let err = analyzer.analyze(&ada()).await.unwrap_err();

        assert_eq!(err.stage(), "model_client");
        match err {
            AnalysisError::Model(LlmError::ServiceUnavailable(message)) => {
                assert_eq!(message, "quota exceeded")
            }
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_quota_exceeded_through_gemini_client() {
        use httpmock::prelude::*;
        use std::time::Duration;

        use crate::llm_client::GeminiClient;

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1beta/generate");
                then.status(429)
                    .header("content-type", "application/json")
                    .body(r#"{"error":{"code":429,"message":"quota exceeded"}}"#);
            })
            .await;
        let client = GeminiClient::new(
            server.url("/v1beta/generate"),
            "test-key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        let analyzer = CareerAnalyzer::new(Arc::new(client));

        let err = analyzer.analyze(&ada()).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.stage(), "model_client");
        match err {
            AnalysisError::Model(LlmError::ServiceUnavailable(message)) => {
                assert_eq!(message, "quota exceeded")
            }
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_tags_extraction_failures() {
        let analyzer = CareerAnalyzer::new(Arc::new(StubModel::replying("I cannot help")));

        let err = analyzer.analyze(&ada()).await.unwrap_err();

        assert_eq!(err.stage(), "response_extractor");
        assert!(matches!(
            err,
            AnalysisError::Extraction(ExtractError::NoJsonFound)
        ));
    }

    #[tokio::test]
    async fn test_analyze_does_not_retry_or_cache() {
        let model = Arc::new(StubModel::with(|| Err(LlmError::EmptyResponse)));
        let analyzer = CareerAnalyzer::new(model.clone());

        assert!(analyzer.analyze(&ada()).await.is_err());
        assert!(analyzer.analyze(&ada()).await.is_err());

        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }
}
