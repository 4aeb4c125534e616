//! Axum route handlers: upload intake, the three-step scoring relay, export
//! and profile editing.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::export::{self, ExportBundle, ExportFormat, ScoreView, SourceFiles};
use crate::normalize::editing::{apply_edits, ProfileEdit};
use crate::normalize::models::CandidateSummary;
use crate::normalize::value::section;
use crate::normalize::{normalize_candidate, unwrap_envelope, CandidateProfile};
use crate::relay::upload::{read_files, take, validate_pdf};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseCvResponse {
    pub success: bool,
    pub file_name: String,
    pub parse_result: Value,
    pub candidate: CandidateProfile,
}

#[derive(Debug, Serialize)]
pub struct ScoreCvResponse {
    pub success: bool,
    pub score: ScoreView,
    pub candidate_summary: CandidateSummary,
    pub bundle: ExportBundle,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub profile: CandidateProfile,
    #[serde(default)]
    pub edits: Vec<ProfileEdit>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/parse-cv
///
/// Parses a single CV (multipart field `cv`) and returns both the raw parse
/// result and the normalized candidate.
pub async fn handle_parse_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseCvResponse>, AppError> {
    let mut files = read_files(&mut multipart).await?;
    let cv = take(&mut files, "cv")
        .ok_or_else(|| AppError::Validation("No CV file provided".to_string()))?;
    validate_pdf(&cv, state.config.max_upload_bytes)?;

    let documents = state.documents()?;

    info!(file = %cv.file_name, bytes = cv.data.len(), "Parsing CV");
    let parse_result = documents.parse_resume(&cv.data).await?;
    let candidate = normalize_candidate(unwrap_envelope(&parse_result));
    info!(skills = candidate.skills.len(), "CV parsed");

    Ok(Json(ParseCvResponse {
        success: true,
        file_name: cv.file_name,
        parse_result,
        candidate,
    }))
}

/// POST /api/score-cv
///
/// Full relay: parse CV, then parse job, then score, one call after the other.
/// Any failure aborts the request and drops whatever earlier steps returned.
pub async fn handle_score_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreCvResponse>, AppError> {
    let mut files = read_files(&mut multipart).await?;
    let (Some(cv), Some(job)) = (take(&mut files, "cv"), take(&mut files, "job")) else {
        return Err(AppError::Validation(
            "Both CV and job description files are required".to_string(),
        ));
    };
    validate_pdf(&cv, state.config.max_upload_bytes)?;
    validate_pdf(&job, state.config.max_upload_bytes)?;

    let documents = state.documents()?;

    info!(cv = %cv.file_name, job = %job.file_name, "Starting CV scoring");

    let resume_response = documents.parse_resume(&cv.data).await?;
    info!("CV parsed");

    let job_response = documents.parse_job(&job.data).await?;
    info!("Job description parsed");

    let scoring_response = documents
        .score(
            section(unwrap_envelope(&resume_response), "ResumeData"),
            section(unwrap_envelope(&job_response), "JobData"),
        )
        .await?;

    let bundle = ExportBundle::from_responses(
        &resume_response,
        &job_response,
        &scoring_response,
        SourceFiles {
            cv_name: cv.file_name,
            job_name: job.file_name,
        },
    );
    let score = ScoreView::from(&bundle.score);
    info!(
        overall = score.overall_percent,
        label = score.label.as_str(),
        "Scoring completed"
    );

    Ok(Json(ScoreCvResponse {
        success: true,
        score,
        candidate_summary: bundle.candidate.summary(),
        bundle,
    }))
}

/// POST /api/export/:format
///
/// Renders a bundle as `json`, `csv` or `report` and returns it as a download.
/// The body is the bundle returned by `/api/score-cv`, edited or not.
pub async fn handle_export(
    Path(format): Path<ExportFormat>,
    body: String,
) -> Result<Response, AppError> {
    let bundle = ExportBundle::from_dump(&body)
        .map_err(|e| AppError::Validation(format!("Invalid export bundle: {e}")))?;
    let artifact = export::render(&bundle, format, chrono::Utc::now().date_naive())?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.filename),
            ),
        ],
        artifact.body,
    )
        .into_response())
}

/// POST /api/candidate/edit
///
/// Applies manual corrections to a normalized candidate and offers the result
/// as a JSON download.
pub async fn handle_edit_candidate(Json(request): Json<EditRequest>) -> Response {
    let profile = apply_edits(request.profile, &request.edits);
    let filename = format!(
        "edited-cv-data-{}.json",
        chrono::Utc::now().timestamp_millis()
    );

    (
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )],
        Json(profile),
    )
        .into_response()
}
