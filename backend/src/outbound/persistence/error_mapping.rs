//! Shared Diesel error classification for the repositories.
//!
//! Repositories turn a [`DieselFailure`] into their own port error, choosing
//! how constraint violations surface (duplicate company, unknown company).

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse category of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique or primary-key constraint rejected the row.
    UniqueViolation { constraint: Option<String> },
    /// A foreign-key constraint rejected the row.
    ForeignKeyViolation,
    /// The database connection was lost.
    Connection(&'static str),
    /// Any other statement failure.
    Query(&'static str),
}

/// Classify a Diesel error, logging the underlying cause at debug level.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DieselFailure::ForeignKeyViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DeserializationError(_) => {
            DieselFailure::Query("database row deserialization error")
        }
        _ => DieselFailure::Query("database error"),
    }
}
