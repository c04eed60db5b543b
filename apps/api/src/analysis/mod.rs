// Career analysis: prompt building, model call, response extraction.
// All model calls go through llm_client; no direct HTTP calls here.

pub mod analyzer;
pub mod extractor;
pub mod handlers;
pub mod prompts;

pub use analyzer::{AnalysisError, CareerAnalyzer};
