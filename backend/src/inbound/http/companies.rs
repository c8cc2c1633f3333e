//! Company API handlers.
//!
//! ```text
//! POST   /companies {"handle":"c1","name":"C1","description":"Desc1"}
//! GET    /companies?name=net&minEmployees=10&maxEmployees=500
//! GET    /companies/c1
//! PATCH  /companies/c1 {"numEmployees":null}
//! DELETE /companies/c1
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Company, CompanyDetail, CompanyFilter, CompanyHandle, CompanyPatch, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{company_validation_error, present, reject_null};

/// Request body for `POST /companies`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompanyRequest {
    #[schema(example = "c1")]
    pub handle: String,
    #[schema(example = "C1")]
    pub name: String,
    #[schema(example = "Desc1")]
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl TryFrom<NewCompanyRequest> for Company {
    type Error = Error;

    fn try_from(value: NewCompanyRequest) -> Result<Self, Self::Error> {
        let handle = CompanyHandle::new(value.handle).map_err(company_validation_error)?;
        Company::try_new(
            handle,
            value.name,
            value.description,
            value.num_employees,
            value.logo_url,
        )
        .map_err(company_validation_error)
    }
}

/// Request body for `PATCH /companies/{handle}`.
///
/// Absent keys are left untouched; `null` clears `numEmployees` or `logoUrl`
/// and is rejected for `name` and `description`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatchRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub logo_url: Option<Option<String>>,
}

impl TryFrom<CompanyPatchRequest> for CompanyPatch {
    type Error = Error;

    fn try_from(value: CompanyPatchRequest) -> Result<Self, Self::Error> {
        CompanyPatch::try_new(
            reject_null(value.name, "name")?,
            reject_null(value.description, "description")?,
            value.num_employees,
            value.logo_url,
        )
        .map_err(company_validation_error)
    }
}

/// Query parameters for `GET /companies`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CompanySearchParams {
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
    /// Inclusive lower bound on employee count.
    pub min_employees: Option<i32>,
    /// Inclusive upper bound on employee count.
    pub max_employees: Option<i32>,
}

impl From<CompanySearchParams> for CompanyFilter {
    fn from(value: CompanySearchParams) -> Self {
        Self {
            name: value.name.filter(|name| !name.is_empty()),
            min_employees: value.min_employees,
            max_employees: value.max_employees,
        }
    }
}

/// `{"company": ...}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyResponse {
    pub company: Company,
}

/// `{"company": ...}` envelope including the company's jobs.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetail,
}

/// `{"companies": [...]}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

/// `{"deleted": handle}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedCompanyResponse {
    #[schema(example = "c1")]
    pub deleted: String,
}

fn parse_handle(raw: String) -> Result<CompanyHandle, Error> {
    CompanyHandle::new(raw).map_err(company_validation_error)
}

/// Create a company.
#[utoipa::path(
    post,
    path = "/companies",
    request_body = NewCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Login required", body = ErrorResponse),
        (status = 409, description = "Duplicate handle", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "createCompany"
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewCompanyRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let company = Company::try_from(payload.into_inner())?;
    let created = state.companies.create(&company).await?;
    Ok(HttpResponse::Created().json(CompanyResponse { company: created }))
}

/// List companies matching optional filters, ordered by name.
#[utoipa::path(
    get,
    path = "/companies",
    params(CompanySearchParams),
    responses(
        (status = 200, description = "Matching companies", body = CompaniesResponse),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "listCompanies",
    security([])
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<HttpState>,
    query: web::Query<CompanySearchParams>,
) -> ApiResult<web::Json<CompaniesResponse>> {
    let filter = CompanyFilter::from(query.into_inner());
    let companies = state.companies.list(&filter).await?;
    Ok(web::Json(CompaniesResponse { companies }))
}

/// Fetch a company and its jobs.
#[utoipa::path(
    get,
    path = "/companies/{handle}",
    params(("handle" = String, Path, description = "Company handle")),
    responses(
        (status = 200, description = "Company with jobs", body = CompanyDetailResponse),
        (status = 404, description = "Unknown company", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "getCompany",
    security([])
)]
#[get("/companies/{handle}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CompanyDetailResponse>> {
    let handle = parse_handle(path.into_inner())?;
    let company = state.companies.get(&handle).await?;
    Ok(web::Json(CompanyDetailResponse { company }))
}

/// Apply a partial update to a company. Administrators only.
#[utoipa::path(
    patch,
    path = "/companies/{handle}",
    params(("handle" = String, Path, description = "Company handle")),
    request_body = CompanyPatchRequest,
    responses(
        (status = 200, description = "Updated company", body = CompanyResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Login required", body = ErrorResponse),
        (status = 403, description = "Administrator rights required", body = ErrorResponse),
        (status = 404, description = "Unknown company", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "updateCompany"
)]
#[patch("/companies/{handle}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CompanyPatchRequest>,
) -> ApiResult<web::Json<CompanyResponse>> {
    session.require_admin()?;
    let handle = parse_handle(path.into_inner())?;
    let patch = CompanyPatch::try_from(payload.into_inner())?;
    let company = state.companies.update(&handle, &patch).await?;
    Ok(web::Json(CompanyResponse { company }))
}

/// Delete a company and, by cascade, its jobs.
#[utoipa::path(
    delete,
    path = "/companies/{handle}",
    params(("handle" = String, Path, description = "Company handle")),
    responses(
        (status = 200, description = "Company deleted", body = DeletedCompanyResponse),
        (status = 401, description = "Login required", body = ErrorResponse),
        (status = 404, description = "Unknown company", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "deleteCompany"
)]
#[delete("/companies/{handle}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedCompanyResponse>> {
    session.require_user()?;
    let handle = parse_handle(path.into_inner())?;
    state.companies.remove(&handle).await?;
    Ok(web::Json(DeletedCompanyResponse {
        deleted: handle.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CompanyRepositoryError, MockCompanyRepository, MockJobRepository};
    use crate::domain::{JobId, JobSummary};
    use crate::inbound::http::test_utils::{login_cookie, state_with, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn c1() -> Company {
        Company::try_new(
            CompanyHandle::new("c1").expect("handle"),
            "C1",
            "Desc1",
            Some(1),
            Some("http://c1.img".to_owned()),
        )
        .expect("company")
    }

    #[rstest]
    #[actix_web::test]
    async fn create_requires_login() {
        let app =
            actix_test::init_service(test_app(state_with(MockCompanyRepository::new(), MockJobRepository::new())))
                .await;
        let request = actix_test::TestRequest::post()
            .uri("/companies")
            .set_json(json!({"handle": "c1", "name": "C1", "description": "Desc1"}))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_201_with_company(c1: Company) {
        let mut companies = MockCompanyRepository::new();
        companies
            .expect_create()
            .withf(|company| company.handle().as_ref() == "c1")
            .times(1)
            .returning(|company| Ok(company.clone()));
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;
        let cookie = login_cookie(&app, "user").await;

        let request = actix_test::TestRequest::post()
            .uri("/companies")
            .cookie(cookie)
            .set_json(json!({
                "handle": "c1",
                "name": "C1",
                "description": "Desc1",
                "numEmployees": 1,
                "logoUrl": "http://c1.img",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"company": serde_json::to_value(&c1).expect("json")}));
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_handle_is_conflict() {
        let mut companies = MockCompanyRepository::new();
        companies
            .expect_create()
            .returning(|_| Err(CompanyRepositoryError::duplicate("c1")));
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;
        let cookie = login_cookie(&app, "user").await;

        let request = actix_test::TestRequest::post()
            .uri("/companies")
            .cookie(cookie)
            .set_json(json!({"handle": "c1", "name": "C1", "description": "Desc1"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"]["message"], "Duplicate company: c1");
    }

    #[rstest]
    #[actix_web::test]
    async fn create_rejects_invalid_logo_url_before_repository() {
        let app =
            actix_test::init_service(test_app(state_with(MockCompanyRepository::new(), MockJobRepository::new())))
                .await;
        let cookie = login_cookie(&app, "user").await;

        let request = actix_test::TestRequest::post()
            .uri("/companies")
            .cookie(cookie)
            .set_json(json!({
                "handle": "c1",
                "name": "C1",
                "description": "Desc1",
                "logoUrl": "not a url",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body["error"]["details"],
            json!({"field": "logoUrl", "code": "invalid_url"})
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn list_passes_filter_through(c1: Company) {
        let mut companies = MockCompanyRepository::new();
        companies
            .expect_list()
            .withf(|filter| {
                *filter
                    == CompanyFilter {
                        name: Some("c".to_owned()),
                        min_employees: Some(1),
                        max_employees: Some(3),
                    }
            })
            .times(1)
            .returning(move |_| Ok(vec![c1.clone()]));
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;

        let request = actix_test::TestRequest::get()
            .uri("/companies?name=c&minEmployees=1&maxEmployees=3")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["companies"][0]["handle"], "c1");
        assert_eq!(body["companies"][0]["numEmployees"], 1);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_query_parameter_is_rejected() {
        let app =
            actix_test::init_service(test_app(state_with(MockCompanyRepository::new(), MockJobRepository::new())))
                .await;

        let request = actix_test::TestRequest::get()
            .uri("/companies?colour=blue")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[rstest]
    #[actix_web::test]
    async fn inverted_employee_range_is_bad_request() {
        let mut companies = MockCompanyRepository::new();
        companies.expect_list().returning(|_| {
            Err(CompanyRepositoryError::invalid_input(
                "minEmployees can't be greater than maxEmployees",
            ))
        });
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;

        let request = actix_test::TestRequest::get()
            .uri("/companies?minEmployees=5&maxEmployees=1")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn get_includes_jobs(c1: Company) {
        let mut companies = MockCompanyRepository::new();
        companies
            .expect_get()
            .withf(|handle| handle.as_ref() == "c1")
            .returning(move |_| {
                Ok(CompanyDetail {
                    company: c1.clone(),
                    jobs: vec![JobSummary {
                        id: JobId::new(7),
                        title: "Full Stack Developer".to_owned(),
                        salary: Some(100_000),
                        equity: Some("0.5".parse().expect("equity")),
                    }],
                })
            });
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/companies/c1").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["company"]["name"], "C1");
        assert_eq!(
            body["company"]["jobs"],
            json!([{"id": 7, "title": "Full Stack Developer", "salary": 100000, "equity": "0.5"}])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn get_unknown_company_is_not_found() {
        let mut companies = MockCompanyRepository::new();
        companies
            .expect_get()
            .returning(|handle| Err(CompanyRepositoryError::not_found(handle.as_ref())));
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/companies/nope").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"]["message"], "No company: nope");
    }

    #[rstest]
    #[case("user", StatusCode::FORBIDDEN)]
    #[case("admin", StatusCode::OK)]
    #[actix_web::test]
    async fn patch_is_admin_only(c1: Company, #[case] username: &str, #[case] expected: StatusCode) {
        let mut companies = MockCompanyRepository::new();
        companies
            .expect_update()
            .withf(|handle, patch| {
                handle.as_ref() == "c1"
                    && patch.name() == Some("New")
                    && patch.logo_url() == Some(None)
                    && patch.num_employees().is_none()
            })
            .returning(move |_, _| Ok(c1.clone()));
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;
        let cookie = login_cookie(&app, username).await;

        let request = actix_test::TestRequest::patch()
            .uri("/companies/c1")
            .cookie(cookie)
            .set_json(json!({"name": "New", "logoUrl": null}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), expected);
    }

    #[rstest]
    #[case(json!({"name": null}), "name")]
    #[case(json!({"description": null, "numEmployees": 3}), "description")]
    #[actix_web::test]
    async fn patch_rejects_null_for_required_fields(#[case] payload: Value, #[case] field: &str) {
        // No expectations: the repository must never be called.
        let app =
            actix_test::init_service(test_app(state_with(MockCompanyRepository::new(), MockJobRepository::new())))
                .await;
        let cookie = login_cookie(&app, "admin").await;

        let request = actix_test::TestRequest::patch()
            .uri("/companies/c1")
            .cookie(cookie)
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"]["details"], json!({"field": field, "code": "null"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn patch_rejects_handle_change() {
        let app =
            actix_test::init_service(test_app(state_with(MockCompanyRepository::new(), MockJobRepository::new())))
                .await;
        let cookie = login_cookie(&app, "admin").await;

        let request = actix_test::TestRequest::patch()
            .uri("/companies/c1")
            .cookie(cookie)
            .set_json(json!({"handle": "c2"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_reports_handle() {
        let mut companies = MockCompanyRepository::new();
        companies
            .expect_remove()
            .withf(|handle| handle.as_ref() == "c1")
            .times(1)
            .returning(|_| Ok(()));
        let app =
            actix_test::init_service(test_app(state_with(companies, MockJobRepository::new()))).await;
        let cookie = login_cookie(&app, "user").await;

        let request = actix_test::TestRequest::delete()
            .uri("/companies/c1")
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"deleted": "c1"}));
    }
}
