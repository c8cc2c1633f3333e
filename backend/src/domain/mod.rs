//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Company, CompanyHandle, CompanyPatch, CompanyFilter: company records.
//! - Job, NewJob, JobPatch, JobFilter: job postings.
//! - LoginCredentials, AuthenticatedUser: login inputs and session identity.

pub mod auth;
pub mod company;
pub mod error;
pub mod job;
pub mod ports;
pub mod trace_id;

pub use self::auth::{AuthenticatedUser, LoginCredentials, LoginValidationError};
pub use self::company::{
    Company, CompanyDetail, CompanyFilter, CompanyHandle, CompanyPatch, CompanyValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::job::{
    Equity, Job, JobFilter, JobId, JobPatch, JobPatchDraft, JobSummary, JobValidationError, NewJob,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

