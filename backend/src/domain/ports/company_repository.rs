//! Port for company persistence.
//!
//! [`CompanyRepository`] covers the full company lifecycle: create, fetch with
//! postings, filtered listing, partial update and removal. Adapters raise
//! [`CompanyRepositoryError`]; handlers convert it into the domain [`Error`].

use async_trait::async_trait;

use crate::domain::{Company, CompanyDetail, CompanyFilter, CompanyHandle, CompanyPatch, Error};

use super::define_port_error;

define_port_error! {
    /// Errors raised by company repository adapters.
    pub enum CompanyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "company repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "company repository query failed: {message}",
        /// The request cannot be turned into a valid statement.
        InvalidInput { message: String } => "{message}",
        /// A company with the same handle already exists.
        Duplicate { handle: String } => "Duplicate company: {handle}",
        /// Another company already uses this name.
        DuplicateName { name: String } => "Duplicate company name: {name}",
        /// No company matches the handle.
        NotFound { handle: String } => "No company: {handle}",
    }
}

/// Port for company storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a new company and return the stored record.
    ///
    /// Fails with [`CompanyRepositoryError::Duplicate`] when the handle is
    /// taken and [`CompanyRepositoryError::DuplicateName`] when the name is.
    async fn create(&self, company: &Company) -> Result<Company, CompanyRepositoryError>;

    /// Fetch a company together with its job postings.
    async fn get(&self, handle: &CompanyHandle) -> Result<CompanyDetail, CompanyRepositoryError>;

    /// List companies matching the filter, ordered by name.
    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, CompanyRepositoryError>;

    /// Apply a partial update and return the updated record.
    async fn update(
        &self,
        handle: &CompanyHandle,
        patch: &CompanyPatch,
    ) -> Result<Company, CompanyRepositoryError>;

    /// Delete a company. Its job postings are removed with it.
    async fn remove(&self, handle: &CompanyHandle) -> Result<(), CompanyRepositoryError>;
}

impl From<CompanyRepositoryError> for Error {
    fn from(error: CompanyRepositoryError) -> Self {
        match error {
            CompanyRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("company repository unavailable: {message}"))
            }
            CompanyRepositoryError::Query { message } => {
                Self::internal(format!("company repository error: {message}"))
            }
            err @ CompanyRepositoryError::InvalidInput { .. } => {
                Self::invalid_request(err.to_string())
            }
            err @ (CompanyRepositoryError::Duplicate { .. }
            | CompanyRepositoryError::DuplicateName { .. }) => Self::conflict(err.to_string()),
            err @ CompanyRepositoryError::NotFound { .. } => Self::not_found(err.to_string()),
        }
    }
}
