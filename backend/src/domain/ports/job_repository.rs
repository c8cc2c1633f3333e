//! Port for job posting persistence.

use async_trait::async_trait;

use crate::domain::{Error, Job, JobFilter, JobId, JobPatch, NewJob};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "job repository query failed: {message}",
        /// The request cannot be turned into a valid statement.
        InvalidInput { message: String } => "{message}",
        /// The posting references a company that does not exist.
        UnknownCompany { handle: String } => "No company: {handle}",
        /// No job matches the identifier.
        NotFound { id: i32 } => "No job: {id}",
    }
}

/// Port for job storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a posting and return it with its generated id.
    async fn create(&self, job: &NewJob) -> Result<Job, JobRepositoryError>;

    /// Fetch a single posting.
    async fn get(&self, id: JobId) -> Result<Job, JobRepositoryError>;

    /// List postings matching the filter, ordered by title.
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, JobRepositoryError>;

    /// Apply a partial update and return the updated posting.
    async fn update(&self, id: JobId, patch: &JobPatch) -> Result<Job, JobRepositoryError>;

    /// Delete a posting.
    async fn remove(&self, id: JobId) -> Result<(), JobRepositoryError>;
}

impl From<JobRepositoryError> for Error {
    fn from(error: JobRepositoryError) -> Self {
        match error {
            JobRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("job repository unavailable: {message}"))
            }
            JobRepositoryError::Query { message } => {
                Self::internal(format!("job repository error: {message}"))
            }
            err @ (JobRepositoryError::InvalidInput { .. }
            | JobRepositoryError::UnknownCompany { .. }) => Self::invalid_request(err.to_string()),
            err @ JobRepositoryError::NotFound { .. } => Self::not_found(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(JobRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(JobRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(JobRepositoryError::invalid_input("No data"), ErrorCode::InvalidRequest)]
    #[case(JobRepositoryError::unknown_company("ghost"), ErrorCode::InvalidRequest)]
    #[case(JobRepositoryError::not_found(0_i32), ErrorCode::NotFound)]
    fn maps_to_domain_error(#[case] error: JobRepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn not_found_names_the_id() {
        let error = Error::from(JobRepositoryError::not_found(42_i32));
        assert_eq!(error.message(), "No job: 42");
    }
}
