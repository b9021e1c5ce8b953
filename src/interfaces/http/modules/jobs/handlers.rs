//! Job API handlers
//!
//! Reads are public. Mutations receive the authenticated user when the
//! router puts them behind the auth middleware, and `None` otherwise.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateJobRequest, JobDto, UpdateJobRequest};
use crate::application::JobService;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct JobHandlerState {
    pub job_service: Arc<JobService>,
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "All job postings", body = Vec<JobDto>),
        (status = 500, description = "Failed to retrieve jobs", body = ErrorBody)
    )
)]
pub async fn list_jobs(State(state): State<JobHandlerState>) -> Result<Json<Vec<JobDto>>, ApiError> {
    let jobs = state
        .job_service
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to retrieve jobs"))?;

    Ok(Json(jobs.into_iter().map(JobDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job ObjectId")),
    responses(
        (status = 200, description = "Job details", body = JobDto),
        (status = 404, description = "Job not found or malformed id", body = ErrorBody)
    )
)]
pub async fn get_job(
    State(state): State<JobHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<JobDto>, ApiError> {
    let job = state
        .job_service
        .get(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to retrieve job"))?;

    Ok(Json(job.into()))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobDto),
        (status = 400, description = "Title and company.name are required", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    )
)]
pub async fn create_job(
    State(state): State<JobHandlerState>,
    auth: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobDto>), ApiError> {
    let owner = auth.as_ref().map(|Extension(a)| a.user_id());

    let job = state
        .job_service
        .create(request.into(), owner)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create job"))?;

    Ok((StatusCode::CREATED, Json(job.into())))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ObjectId")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Updated job", body = JobDto),
        (status = 400, description = "Malformed id or invalid job data", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Job belongs to another user", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    )
)]
pub async fn update_job(
    State(state): State<JobHandlerState>,
    Path(id): Path<String>,
    auth: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> Result<Json<JobDto>, ApiError> {
    let actor = auth.as_ref().map(|Extension(a)| a.user_id());

    let job = state
        .job_service
        .update(&id, request.into(), actor)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to update job"))?;

    Ok(Json(job.into()))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ObjectId")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Job belongs to another user", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    )
)]
pub async fn delete_job(
    State(state): State<JobHandlerState>,
    Path(id): Path<String>,
    auth: Option<Extension<AuthenticatedUser>>,
) -> Result<StatusCode, ApiError> {
    let actor = auth.as_ref().map(|Extension(a)| a.user_id());

    state
        .job_service
        .delete(&id, actor)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to delete job"))?;

    Ok(StatusCode::NO_CONTENT)
}
