use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::scrape::fetch::{fetch_jobs, get_job_data, split_job_ids};
use crate::scrape::parser::JobRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobLookupRequest {
    /// Comma-separated job ids, e.g. `"111123,111132"`.
    pub job_ids: String,
}

/// POST /api/v1/jobs
/// Batch lookup; ids that fail to fetch are silently omitted.
pub async fn handle_lookup_jobs(
    State(state): State<AppState>,
    Json(req): Json<JobLookupRequest>,
) -> Result<Json<Vec<JobRecord>>, AppError> {
    let job_ids = split_job_ids(&req.job_ids);
    if job_ids.is_empty() {
        return Err(AppError::Validation("No job ids provided".to_string()));
    }
    Ok(Json(fetch_jobs(state.fetcher.as_ref(), &job_ids).await))
}

/// GET /api/v1/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobRecord>, AppError> {
    let record = get_job_data(state.fetcher.as_ref(), &job_id)
        .await
        .map_err(|e| AppError::Fetch(e.to_string()))?;
    Ok(Json(record))
}
