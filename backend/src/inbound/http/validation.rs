//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report failures as typed enums; these helpers turn
//! them into `invalid_request` errors carrying `details {field, code}` so
//! every endpoint reports bad input the same way.

use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::{
    CompanyValidationError, Error, JobValidationError, LoginValidationError,
};

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }
}

pub(crate) fn company_validation_error(err: CompanyValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(err.code())
}

pub(crate) fn job_validation_error(err: JobValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(err.code())
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            ValidationError::new("username", "username must not be empty")
                .with_code("empty_username")
        }
        LoginValidationError::EmptyPassword => {
            ValidationError::new("password", "password must not be empty")
                .with_code("empty_password")
        }
    }
}

/// Unwrap a `present` field that has no null state.
///
/// `"key": null` fails with `details {field, code: "null"}`; an absent key
/// stays `None`.
pub(crate) fn reject_null<T>(value: Option<Option<T>>, field: &'static str) -> Result<Option<T>, Error> {
    match value {
        Some(None) => Err(ValidationError::new(field, format!("{field} must not be null"))
            .with_code("null")),
        other => Ok(other.flatten()),
    }
}

/// Deserialize a field that was present in the payload, even when `null`.
///
/// Pair with `#[serde(default)]` on an `Option<Option<T>>` so an absent key
/// stays `None` while `"key": null` becomes `Some(None)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
