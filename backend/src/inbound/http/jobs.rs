//! Job API handlers.
//!
//! ```text
//! POST   /jobs {"title":"Full Stack Developer","salary":100000,"equity":"0.5","company_handle":"c1"}
//! GET    /jobs?title=dev&minSalary=110000&hasEquity=true
//! GET    /jobs/1
//! PATCH  /jobs/1 {"salary":90000}
//! DELETE /jobs/1
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CompanyHandle, Equity, Error, Job, JobFilter, JobId, JobPatch, JobPatchDraft,
    JobValidationError, NewJob,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{job_validation_error, present, reject_null};

fn parse_equity(raw: Option<String>) -> Result<Option<Equity>, Error> {
    raw.map(|value| value.parse::<Equity>())
        .transpose()
        .map_err(job_validation_error)
}

/// Request body for `POST /jobs`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewJobRequest {
    #[schema(example = "Full Stack Developer")]
    pub title: String,
    #[serde(default)]
    #[schema(example = 100_000)]
    pub salary: Option<i32>,
    /// Decimal string in `[0, 1]`.
    #[serde(default)]
    #[schema(example = "0.5")]
    pub equity: Option<String>,
    #[schema(example = "c1")]
    pub company_handle: String,
}

impl TryFrom<NewJobRequest> for NewJob {
    type Error = Error;

    fn try_from(value: NewJobRequest) -> Result<Self, Self::Error> {
        let company_handle = CompanyHandle::new(value.company_handle)
            .map_err(|err| job_validation_error(JobValidationError::from(err)))?;
        let equity = parse_equity(value.equity)?;
        NewJob::try_new(value.title, value.salary, equity, company_handle)
            .map_err(job_validation_error)
    }
}

/// Request body for `PATCH /jobs/{id}`.
///
/// Only `title`, `salary` and `equity` may change. Supplying `id` or
/// `company_handle`, even as `null`, is rejected before anything is written.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct JobPatchRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub equity: Option<Option<String>>,
    /// Never accepted.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Object>)]
    pub id: Option<Value>,
    /// Never accepted.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Object>)]
    pub company_handle: Option<Value>,
}

impl TryFrom<JobPatchRequest> for JobPatch {
    type Error = Error;

    fn try_from(value: JobPatchRequest) -> Result<Self, Self::Error> {
        let draft = JobPatchDraft {
            id_supplied: value.id.is_some(),
            company_handle_supplied: value.company_handle.is_some(),
            title: reject_null(value.title, "title")?,
            salary: value.salary,
            equity: value.equity.map(parse_equity).transpose()?,
        };
        JobPatch::try_from(draft).map_err(job_validation_error)
    }
}

/// Query parameters for `GET /jobs`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct JobSearchParams {
    /// Case-insensitive substring of the job title.
    pub title: Option<String>,
    /// Inclusive lower bound on salary.
    pub min_salary: Option<i32>,
    /// Only jobs with non-zero equity when `true`.
    pub has_equity: Option<bool>,
}

impl From<JobSearchParams> for JobFilter {
    fn from(value: JobSearchParams) -> Self {
        Self {
            title: value.title.filter(|title| !title.is_empty()),
            min_salary: value.min_salary,
            has_equity: value.has_equity.unwrap_or(false),
        }
    }
}

/// `{"job": ...}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobResponse {
    pub job: Job,
}

/// `{"jobs": [...]}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

/// `{"deleted": id}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedJobResponse {
    #[schema(example = 1)]
    pub deleted: i32,
}

/// Create a job for an existing company.
#[utoipa::path(
    post,
    path = "/jobs",
    request_body = NewJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid request or unknown company", body = ErrorResponse),
        (status = 401, description = "Login required", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewJobRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let job = NewJob::try_from(payload.into_inner())?;
    let created = state.jobs.create(&job).await?;
    Ok(HttpResponse::Created().json(JobResponse { job: created }))
}

/// List jobs matching optional filters, ordered by title.
#[utoipa::path(
    get,
    path = "/jobs",
    params(JobSearchParams),
    responses(
        (status = 200, description = "Matching jobs", body = JobsResponse),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tags = ["jobs"],
    operation_id = "listJobs",
    security([])
)]
#[get("/jobs")]
pub async fn list_jobs(
    state: web::Data<HttpState>,
    query: web::Query<JobSearchParams>,
) -> ApiResult<web::Json<JobsResponse>> {
    let filter = JobFilter::from(query.into_inner());
    let jobs = state.jobs.list(&filter).await?;
    Ok(web::Json(JobsResponse { jobs }))
}

/// Fetch a single job.
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job", body = JobResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Unknown job", body = ErrorResponse)
    ),
    tags = ["jobs"],
    operation_id = "getJob",
    security([])
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<JobResponse>> {
    let job = state.jobs.get(JobId::new(path.into_inner())).await?;
    Ok(web::Json(JobResponse { job }))
}

/// Apply a partial update to a job. Administrators only.
#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    params(("id" = i32, Path, description = "Job id")),
    request_body = JobPatchRequest,
    responses(
        (status = 200, description = "Updated job", body = JobResponse),
        (status = 400, description = "Invalid or immutable field", body = ErrorResponse),
        (status = 401, description = "Login required", body = ErrorResponse),
        (status = 403, description = "Administrator rights required", body = ErrorResponse),
        (status = 404, description = "Unknown job", body = ErrorResponse)
    ),
    tags = ["jobs"],
    operation_id = "updateJob"
)]
#[patch("/jobs/{id}")]
pub async fn update_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<JobPatchRequest>,
) -> ApiResult<web::Json<JobResponse>> {
    session.require_admin()?;
    let patch = JobPatch::try_from(payload.into_inner())?;
    let job = state
        .jobs
        .update(JobId::new(path.into_inner()), &patch)
        .await?;
    Ok(web::Json(JobResponse { job }))
}

/// Delete a job.
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job deleted", body = DeletedJobResponse),
        (status = 401, description = "Login required", body = ErrorResponse),
        (status = 404, description = "Unknown job", body = ErrorResponse)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob"
)]
#[delete("/jobs/{id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeletedJobResponse>> {
    session.require_user()?;
    let id = JobId::new(path.into_inner());
    state.jobs.remove(id).await?;
    Ok(web::Json(DeletedJobResponse { deleted: id.get() }))
}
