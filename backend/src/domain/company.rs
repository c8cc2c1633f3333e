//! Company records and the inputs used to create, edit and search them.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use super::job::JobSummary;

/// Maximum length, in characters, of a company handle.
pub const COMPANY_HANDLE_MAX: usize = 25;

/// Validation errors returned by company constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyValidationError {
    EmptyHandle,
    HandleTooLong { max: usize },
    EmptyName,
    NegativeEmployees,
    InvalidLogoUrl,
}

impl CompanyValidationError {
    /// Name of the offending JSON field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyHandle | Self::HandleTooLong { .. } => "handle",
            Self::EmptyName => "name",
            Self::NegativeEmployees => "numEmployees",
            Self::InvalidLogoUrl => "logoUrl",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyHandle | Self::EmptyName => "empty",
            Self::HandleTooLong { .. } => "too_long",
            Self::NegativeEmployees => "negative",
            Self::InvalidLogoUrl => "invalid_url",
        }
    }
}

impl fmt::Display for CompanyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "company handle must not be empty"),
            Self::HandleTooLong { max } => {
                write!(f, "company handle must be at most {max} characters")
            }
            Self::EmptyName => write!(f, "company name must not be empty"),
            Self::NegativeEmployees => write!(f, "numEmployees must not be negative"),
            Self::InvalidLogoUrl => write!(f, "logoUrl must be an absolute URL"),
        }
    }
}

impl std::error::Error for CompanyValidationError {}

/// Unique, human-assigned company key.
///
/// ## Invariants
/// - Non-empty once trimmed and at most [`COMPANY_HANDLE_MAX`] characters.
///
/// # Examples
/// ```
/// use jobly::domain::CompanyHandle;
///
/// let handle = CompanyHandle::new("c1").unwrap();
/// assert_eq!(handle.as_ref(), "c1");
/// assert!(CompanyHandle::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyHandle(String);

impl CompanyHandle {
    /// Validate and construct a [`CompanyHandle`].
    pub fn new(handle: impl Into<String>) -> Result<Self, CompanyValidationError> {
        Self::from_owned(handle.into())
    }

    fn from_owned(handle: String) -> Result<Self, CompanyValidationError> {
        if handle.trim().is_empty() {
            return Err(CompanyValidationError::EmptyHandle);
        }
        if handle.chars().count() > COMPANY_HANDLE_MAX {
            return Err(CompanyValidationError::HandleTooLong {
                max: COMPANY_HANDLE_MAX,
            });
        }
        Ok(Self(handle))
    }
}

impl AsRef<str> for CompanyHandle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CompanyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CompanyHandle> for String {
    fn from(value: CompanyHandle) -> Self {
        value.0
    }
}

impl TryFrom<String> for CompanyHandle {
    type Error = CompanyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

fn validate_name(name: &str) -> Result<(), CompanyValidationError> {
    if name.trim().is_empty() {
        return Err(CompanyValidationError::EmptyName);
    }
    Ok(())
}

fn validate_num_employees(num_employees: Option<i32>) -> Result<(), CompanyValidationError> {
    match num_employees {
        Some(n) if n < 0 => Err(CompanyValidationError::NegativeEmployees),
        _ => Ok(()),
    }
}

fn validate_logo_url(logo_url: Option<&str>) -> Result<(), CompanyValidationError> {
    match logo_url {
        Some(raw) => Url::parse(raw)
            .map(|_| ())
            .map_err(|_| CompanyValidationError::InvalidLogoUrl),
        None => Ok(()),
    }
}

/// A company listed on the board.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `num_employees`, when present, is non-negative.
/// - `logo_url`, when present, parses as an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[schema(value_type = String, example = "c1")]
    handle: CompanyHandle,
    #[schema(example = "C1")]
    name: String,
    #[schema(example = "Desc1")]
    description: String,
    #[schema(example = 1)]
    num_employees: Option<i32>,
    #[schema(example = "http://c1.img")]
    logo_url: Option<String>,
}

impl Company {
    /// Validate and construct a [`Company`].
    ///
    /// # Examples
    /// ```
    /// use jobly::domain::{Company, CompanyHandle};
    ///
    /// let company = Company::try_new(
    ///     CompanyHandle::new("c1").unwrap(),
    ///     "C1",
    ///     "Desc1",
    ///     Some(1),
    ///     Some("http://c1.img".to_owned()),
    /// )
    /// .unwrap();
    /// assert_eq!(company.name(), "C1");
    /// ```
    pub fn try_new(
        handle: CompanyHandle,
        name: impl Into<String>,
        description: impl Into<String>,
        num_employees: Option<i32>,
        logo_url: Option<String>,
    ) -> Result<Self, CompanyValidationError> {
        let name = name.into();
        validate_name(&name)?;
        validate_num_employees(num_employees)?;
        validate_logo_url(logo_url.as_deref())?;
        Ok(Self {
            handle,
            name,
            description: description.into(),
            num_employees,
            logo_url,
        })
    }

    pub fn handle(&self) -> &CompanyHandle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn num_employees(&self) -> Option<i32> {
        self.num_employees
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }
}

/// A company together with the jobs it has posted.
///
/// `jobs` is always present and empty when the company has no postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Sparse set of company changes.
///
/// `None` leaves a field untouched. For nullable columns `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    name: Option<String>,
    description: Option<String>,
    num_employees: Option<Option<i32>>,
    logo_url: Option<Option<String>>,
}

impl CompanyPatch {
    /// Validate and construct a [`CompanyPatch`].
    pub fn try_new(
        name: Option<String>,
        description: Option<String>,
        num_employees: Option<Option<i32>>,
        logo_url: Option<Option<String>>,
    ) -> Result<Self, CompanyValidationError> {
        if let Some(name) = name.as_deref() {
            validate_name(name)?;
        }
        validate_num_employees(num_employees.flatten())?;
        validate_logo_url(logo_url.as_ref().and_then(Option::as_deref))?;
        Ok(Self {
            name,
            description,
            num_employees,
            logo_url,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn num_employees(&self) -> Option<Option<i32>> {
        self.num_employees
    }

    pub fn logo_url(&self) -> Option<Option<&str>> {
        self.logo_url.as_ref().map(Option::as_deref)
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.num_employees.is_none()
            && self.logo_url.is_none()
    }
}

/// Optional search constraints for company listings.
///
/// Range consistency (`min_employees <= max_employees`) is checked when the
/// query is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
    /// Inclusive lower bound on `num_employees`.
    pub min_employees: Option<i32>,
    /// Inclusive upper bound on `num_employees`.
    pub max_employees: Option<i32>,
}
