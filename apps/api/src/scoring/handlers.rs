//! Axum route handlers for the dashboard heuristics.

use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::cv::CvData;
use crate::models::interview::InterviewSession;
use crate::models::job::SavedJob;
use crate::models::profile::UserProfile;
use crate::scoring::interview::{analyze_session, SessionAnalysis};
use crate::scoring::readiness::{compute_readiness_report, ReadinessReport};
use crate::scoring::relevance::{rank_jobs, RankedJob};

#[derive(Debug, Deserialize)]
pub struct ReadinessRequest {
    pub profile: UserProfile,
    pub cv: Option<CvData>,
    #[serde(default)]
    pub sessions: Vec<InterviewSession>,
    #[serde(default)]
    pub jobs: Vec<SavedJob>,
}

#[derive(Debug, Deserialize)]
pub struct RankJobsRequest {
    pub profile: UserProfile,
    pub jobs: Vec<SavedJob>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeSessionRequest {
    pub session: InterviewSession,
}

/// POST /api/v1/readiness
pub async fn handle_readiness(
    Json(req): Json<ReadinessRequest>,
) -> Result<Json<ReadinessReport>, AppError> {
    let report = compute_readiness_report(&req.profile, req.cv.as_ref(), &req.sessions, &req.jobs);
    info!(
        user_id = %req.profile.id,
        overall_score = report.overall_score,
        "Computed readiness report"
    );
    Ok(Json(report))
}

/// POST /api/v1/jobs/rank
pub async fn handle_rank_jobs(
    Json(req): Json<RankJobsRequest>,
) -> Result<Json<Vec<RankedJob>>, AppError> {
    Ok(Json(rank_jobs(&req.profile, req.jobs)))
}

/// POST /api/v1/interview/analyze
pub async fn handle_analyze_session(
    Json(req): Json<AnalyzeSessionRequest>,
) -> Result<Json<SessionAnalysis>, AppError> {
    if req.session.responses.is_empty() {
        return Err(AppError::Validation(
            "session.responses cannot be empty".to_string(),
        ));
    }
    Ok(Json(analyze_session(&req.session)))
}
