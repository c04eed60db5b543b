use std::sync::Arc;

use crate::analysis::CareerAnalyzer;
use crate::report::PdfReportRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-request data; every analysis runs independently.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: CareerAnalyzer,
    pub renderer: Arc<PdfReportRenderer>,
}
