//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod companies;
pub mod error;
pub mod health;
pub mod jobs;
pub mod login;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register the login, company and job handlers on `cfg`.
///
/// Extractor configuration is attached here so malformed bodies, query
/// strings and path segments all render the standard error envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(login::login)
        .service(companies::create_company)
        .service(companies::list_companies)
        .service(companies::get_company)
        .service(companies::update_company)
        .service(companies::delete_company)
        .service(jobs::create_job)
        .service(jobs::list_jobs)
        .service(jobs::get_job)
        .service(jobs::update_job)
        .service(jobs::delete_job);
}
