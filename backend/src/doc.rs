//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer (login,
//! companies, jobs, health), the request and response envelopes, and the
//! session cookie security scheme. The generated document backs Swagger UI
//! in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::companies::{
    CompaniesResponse, CompanyDetailResponse, CompanyPatchRequest, CompanyResponse,
    DeletedCompanyResponse, NewCompanyRequest,
};
use crate::inbound::http::error::{ErrorBody, ErrorResponse};
use crate::inbound::http::jobs::{
    DeletedJobResponse, JobPatchRequest, JobResponse, JobsResponse, NewJobRequest,
};
use crate::inbound::http::login::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Jobly API",
        description = "Job board: companies, their job postings, and session login."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::list_companies,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::update_company,
        crate::inbound::http::companies::delete_company,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::update_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        LoginRequest,
        NewCompanyRequest,
        CompanyPatchRequest,
        CompanyResponse,
        CompanyDetailResponse,
        CompaniesResponse,
        DeletedCompanyResponse,
        NewJobRequest,
        JobPatchRequest,
        JobResponse,
        JobsResponse,
        DeletedJobResponse,
    )),
    tags(
        (name = "auth", description = "Session login"),
        (name = "companies", description = "Companies posting jobs"),
        (name = "jobs", description = "Job postings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
