use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use super::conditional;
use super::error::ApiError;
use crate::AppState;
use crate::runs::{RunList, RunSnapshot, RunSource, RunState};

#[derive(Debug, Deserialize)]
pub struct ListRunsQuery {
    /// Lowers the configured maximum; never raises it.
    pub limit: Option<usize>,
}

/// Body of `PUT /api/jobs/{job}/runs/{id}`. The run id comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRunRequest {
    pub display_name: String,
    pub start_time_millis: i64,
    #[serde(default)]
    pub duration_millis: i64,
    #[serde(default)]
    pub change_count: u64,
    pub state: RunState,
}

/// GET /api/jobs - Known job names.
pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.runs.jobs())
}

/// GET /api/jobs/{job}/runs - Run list with conditional-GET support.
pub async fn list_runs(
    State(state): State<AppState>,
    Path(job): Path<String>,
    Query(query): Query<ListRunsQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let max_runs = state.config.list.max_runs;
    let limit = query.limit.map_or(max_runs, |l| l.min(max_runs));

    let list = RunList::collect(&state.runs, &job, limit)?;
    let etag = list.etag.clone();

    if let Some(tag) = etag.as_deref() {
        if conditional::if_none_match(&headers, tag) {
            info!(name: "runs.list.not_modified", job = %job, etag = %tag, "Run list unchanged");
            let mut response = StatusCode::NOT_MODIFIED.into_response();
            conditional::put_cache_headers(response.headers_mut(), Some(tag));
            return Ok(response);
        }
    }

    info!(
        name: "runs.list.served",
        job = %job,
        runs = list.runs.len(),
        etag = ?etag,
        "Run list served"
    );

    let mut response = Json(list).into_response();
    conditional::put_cache_headers(response.headers_mut(), etag.as_deref());
    Ok(response)
}

/// GET /api/jobs/{job}/runs/{id} - One run snapshot.
pub async fn get_run(
    State(state): State<AppState>,
    Path((job, run_id)): Path<(String, String)>,
) -> Result<Json<RunSnapshot>, ApiError> {
    state
        .runs
        .get(&job, &run_id)
        .map(Json)
        .ok_or(ApiError::RunNotFound { job, run_id })
}

/// PUT /api/jobs/{job}/runs/{id} - Publish the latest snapshot of a run.
pub async fn publish_run(
    State(state): State<AppState>,
    Path((job, run_id)): Path<(String, String)>,
    Json(req): Json<PublishRunRequest>,
) -> Result<(StatusCode, Json<RunSnapshot>), ApiError> {
    let snapshot = RunSnapshot::new(
        run_id,
        req.display_name,
        req.start_time_millis,
        req.duration_millis,
        req.change_count,
        req.state,
    );
    let replaced = state.runs.publish(&job, snapshot.clone())?;

    info!(
        name: "runs.published",
        job = %job,
        run_id = %snapshot.id(),
        state = %snapshot.state(),
        replaced = replaced.is_some(),
        "Run snapshot published"
    );

    let status = if replaced.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(snapshot)))
}

/// DELETE /api/jobs/{job}/runs/{id} - Forget a run.
pub async fn delete_run(
    State(state): State<AppState>,
    Path((job, run_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    match state.runs.remove(&job, &run_id) {
        Some(_) => {
            info!(name: "runs.removed", job = %job, run_id = %run_id, "Run removed");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::RunNotFound { job, run_id }),
    }
}
