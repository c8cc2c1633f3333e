//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CompanyRepository, JobRepository, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub companies: Arc<dyn CompanyRepository>,
    pub jobs: Arc<dyn JobRepository>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```ignore
    /// use std::sync::Arc;
    /// use jobly::domain::ports::FixtureLoginService;
    /// use jobly::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureLoginService), companies, jobs);
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        companies: Arc<dyn CompanyRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            login,
            companies,
            jobs,
        }
    }
}
