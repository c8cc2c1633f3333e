//! Job postings and the inputs used to create, edit and search them.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::company::{CompanyHandle, CompanyValidationError};

/// Validation errors returned by job constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobValidationError {
    EmptyTitle,
    NonPositiveSalary,
    InvalidEquity,
    EquityOutOfRange,
    /// A field that can never change after creation was supplied.
    ImmutableField { field: &'static str },
    CompanyHandle(CompanyValidationError),
}

impl JobValidationError {
    /// Name of the offending JSON field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::NonPositiveSalary => "salary",
            Self::InvalidEquity | Self::EquityOutOfRange => "equity",
            Self::ImmutableField { field } => *field,
            Self::CompanyHandle(_) => "company_handle",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty",
            Self::NonPositiveSalary => "not_positive",
            Self::InvalidEquity => "invalid_decimal",
            Self::EquityOutOfRange => "out_of_range",
            Self::ImmutableField { .. } => "immutable",
            Self::CompanyHandle(inner) => inner.code(),
        }
    }
}

impl fmt::Display for JobValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "job title must not be empty"),
            Self::NonPositiveSalary => write!(f, "salary must be a positive integer"),
            Self::InvalidEquity => write!(f, "equity must be a decimal string"),
            Self::EquityOutOfRange => write!(f, "equity must be between 0 and 1"),
            Self::ImmutableField { field } => write!(f, "cannot update {field} of a job"),
            Self::CompanyHandle(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for JobValidationError {}

impl From<CompanyValidationError> for JobValidationError {
    fn from(value: CompanyValidationError) -> Self {
        Self::CompanyHandle(value)
    }
}

/// Database-generated job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i32);

impl JobId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ownership share granted with a job, an exact decimal in `[0, 1]`.
///
/// Serialised as a decimal string so precision survives the JSON boundary.
///
/// # Examples
/// ```
/// use jobly::domain::Equity;
///
/// let equity: Equity = "0.5".parse().unwrap();
/// assert_eq!(equity.to_string(), "0.5");
/// assert!("1.5".parse::<Equity>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Equity(BigDecimal);

impl Equity {
    /// Validate a decimal value against the `[0, 1]` range.
    pub fn new(value: BigDecimal) -> Result<Self, JobValidationError> {
        if value < BigDecimal::from(0) || value > BigDecimal::from(1) {
            return Err(JobValidationError::EquityOutOfRange);
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    pub fn into_decimal(self) -> BigDecimal {
        self.0
    }
}

impl FromStr for Equity {
    type Err = JobValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s.trim()).map_err(|_| JobValidationError::InvalidEquity)?;
        Self::new(value)
    }
}

/// Always positional notation; `BigDecimal`'s own `Display` switches to
/// exponents for small values.
impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_plain_string(f)
    }
}

impl From<Equity> for String {
    fn from(value: Equity) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Equity {
    type Error = JobValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn validate_title(title: &str) -> Result<(), JobValidationError> {
    if title.trim().is_empty() {
        return Err(JobValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_salary(salary: Option<i32>) -> Result<(), JobValidationError> {
    match salary {
        Some(value) if value <= 0 => Err(JobValidationError::NonPositiveSalary),
        _ => Ok(()),
    }
}

/// A persisted job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Job {
    #[schema(value_type = i32, example = 1)]
    pub id: JobId,
    #[schema(example = "Full Stack Developer")]
    pub title: String,
    #[schema(example = 100_000)]
    pub salary: Option<i32>,
    #[schema(value_type = Option<String>, example = "0.5")]
    pub equity: Option<Equity>,
    #[schema(value_type = String, example = "c1")]
    pub company_handle: CompanyHandle,
}

/// Job row embedded in a company detail response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct JobSummary {
    #[schema(value_type = i32, example = 1)]
    pub id: JobId,
    pub title: String,
    pub salary: Option<i32>,
    #[schema(value_type = Option<String>, example = "0.1")]
    pub equity: Option<Equity>,
}

impl From<Job> for JobSummary {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            salary: value.salary,
            equity: value.equity,
        }
    }
}

/// Validated input for creating a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    title: String,
    salary: Option<i32>,
    equity: Option<Equity>,
    company_handle: CompanyHandle,
}

impl NewJob {
    /// Validate and construct a [`NewJob`].
    ///
    /// # Examples
    /// ```
    /// use jobly::domain::{CompanyHandle, NewJob};
    ///
    /// let job = NewJob::try_new(
    ///     "Full Stack Developer",
    ///     Some(100_000),
    ///     Some("0.5".parse().unwrap()),
    ///     CompanyHandle::new("c1").unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(job.title(), "Full Stack Developer");
    /// ```
    pub fn try_new(
        title: impl Into<String>,
        salary: Option<i32>,
        equity: Option<Equity>,
        company_handle: CompanyHandle,
    ) -> Result<Self, JobValidationError> {
        let title = title.into();
        validate_title(&title)?;
        validate_salary(salary)?;
        Ok(Self {
            title,
            salary,
            equity,
            company_handle,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn salary(&self) -> Option<i32> {
        self.salary
    }

    pub fn equity(&self) -> Option<&Equity> {
        self.equity.as_ref()
    }

    pub fn company_handle(&self) -> &CompanyHandle {
        &self.company_handle
    }
}

/// Raw job edit as received from a caller, before immutability checks.
///
/// `id_supplied` and `company_handle_supplied` record whether the caller
/// tried to change either key; their values are never used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatchDraft {
    pub title: Option<String>,
    pub salary: Option<Option<i32>>,
    pub equity: Option<Option<Equity>>,
    pub id_supplied: bool,
    pub company_handle_supplied: bool,
}

/// Sparse set of job changes.
///
/// Only `title`, `salary` and `equity` are editable. `Some(None)` clears a
/// nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    title: Option<String>,
    salary: Option<Option<i32>>,
    equity: Option<Option<Equity>>,
}

impl JobPatch {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn salary(&self) -> Option<Option<i32>> {
        self.salary
    }

    pub fn equity(&self) -> Option<Option<&Equity>> {
        self.equity.as_ref().map(Option::as_ref)
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.equity.is_none()
    }
}

impl TryFrom<JobPatchDraft> for JobPatch {
    type Error = JobValidationError;

    fn try_from(value: JobPatchDraft) -> Result<Self, Self::Error> {
        let JobPatchDraft {
            title,
            salary,
            equity,
            id_supplied,
            company_handle_supplied,
        } = value;

        if id_supplied {
            return Err(JobValidationError::ImmutableField { field: "id" });
        }
        if company_handle_supplied {
            return Err(JobValidationError::ImmutableField {
                field: "company_handle",
            });
        }
        if let Some(title) = title.as_deref() {
            validate_title(title)?;
        }
        validate_salary(salary.flatten())?;

        Ok(Self {
            title,
            salary,
            equity,
        })
    }
}

/// Optional search constraints for job listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of the job title.
    pub title: Option<String>,
    /// Inclusive lower bound on salary.
    pub min_salary: Option<i32>,
    /// Restrict to jobs with non-zero equity when `true`.
    pub has_equity: bool,
}
