//! Domain field to storage column mapping.
//!
//! Fields are closed enums per entity. A field whose JSON name differs from
//! its column name overrides [`FieldMapper::remapped_column`]; every other
//! field maps to its own name.

/// Maps a domain field to the column that stores it.
pub trait FieldMapper: Copy {
    /// Field name as it appears in the API.
    fn name(self) -> &'static str;

    /// Storage column, when it differs from [`FieldMapper::name`].
    fn remapped_column(self) -> Option<&'static str> {
        None
    }

    /// Storage column for the field.
    fn column(self) -> &'static str {
        self.remapped_column().unwrap_or_else(|| self.name())
    }
}

/// Editable company fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Description,
    NumEmployees,
    LogoUrl,
}

impl FieldMapper for CompanyField {
    fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::NumEmployees => "numEmployees",
            Self::LogoUrl => "logoUrl",
        }
    }

    fn remapped_column(self) -> Option<&'static str> {
        match self {
            Self::NumEmployees => Some("num_employees"),
            Self::LogoUrl => Some("logo_url"),
            Self::Name | Self::Description => None,
        }
    }
}

/// Editable job fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Salary,
    Equity,
}

impl FieldMapper for JobField {
    fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Salary => "salary",
            Self::Equity => "equity",
        }
    }
}
