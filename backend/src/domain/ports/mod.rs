//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod company_repository;
mod job_repository;
mod login_service;

#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyRepository, CompanyRepositoryError};
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobRepository, JobRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
