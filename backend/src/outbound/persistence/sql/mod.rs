//! Dynamic SQL fragment builders for partial updates and filtered listings.
//!
//! Column names only ever come from the closed field enums in
//! [`field_map`]; caller-supplied values always travel as positional
//! parameters (`$1`, `$2`, ...) in a [`SqlValue`] list.

mod field_map;
mod filter_query;
mod partial_update;
mod value;

pub use field_map::{CompanyField, FieldMapper, JobField};
pub use filter_query::{FilterQuery, company_filter_query, job_filter_query};
pub use partial_update::{SetClause, partial_update};
pub use value::SqlValue;
pub(crate) use value::bind_values;

/// Errors raised while assembling SQL fragments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlBuildError {
    /// A partial update was requested with no fields.
    #[error("No data")]
    EmptyUpdate,
    /// A range filter has its lower bound above its upper bound.
    #[error("{min_field} can't be greater than {max_field}")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
    },
}
