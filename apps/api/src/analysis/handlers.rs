//! Axum route handlers for the Career Analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;

use crate::errors::AppError;
use crate::models::UserProfile;
use crate::report::report_filename;
use crate::state::AppState;

const PDF_MEDIA_TYPE: &str = "application/pdf";

fn wants_pdf(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(PDF_MEDIA_TYPE))
}

/// POST /api/careerpath/analyze
///
/// Runs the analysis pipeline for the submitted profile. Returns the JSON
/// result, or a PDF report when the `Accept` header asks for `application/pdf`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(profile) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    profile.validate().map_err(AppError::Validation)?;

    let result = state.analyzer.analyze(&profile).await?;

    if !wants_pdf(&headers) {
        return Ok(Json(result).into_response());
    }

    let renderer = state.renderer.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&result, &profile))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_filename(Local::now().date_naive())
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PDF_MEDIA_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}
