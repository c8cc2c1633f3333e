//! Filtered `SELECT` statements for company and job listings.
//!
//! Each entity has a fixed filter schema. Predicates are emitted in schema
//! order regardless of which criteria are present, and placeholders are
//! numbered densely from `$1`.

use bigdecimal::BigDecimal;

use crate::domain::{CompanyFilter, JobFilter};

use super::{SqlBuildError, SqlValue};

const COMPANY_SELECT: &str =
    "SELECT handle, name, description, num_employees, logo_url FROM companies";
const JOB_SELECT: &str = "SELECT id, title, salary, equity, company_handle FROM jobs";

/// A complete statement plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Accumulates `AND`-joined predicates, numbering placeholders as it goes.
#[derive(Debug, Default)]
struct Predicates {
    conditions: Vec<String>,
    values: Vec<SqlValue>,
}

impl Predicates {
    fn push(&mut self, column: &str, operator: &str, value: SqlValue) {
        self.values.push(value);
        self.conditions
            .push(format!("{column} {operator} ${}", self.values.len()));
    }

    fn push_substring(&mut self, column: &str, needle: Option<&str>) {
        if let Some(needle) = needle.filter(|n| !n.is_empty()) {
            self.push(column, "ILIKE", SqlValue::text(contains_pattern(needle)));
        }
    }

    fn finish(self, select: &str, order_by: &str) -> FilterQuery {
        let mut sql = select.to_owned();
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
        FilterQuery {
            sql,
            values: self.values,
        }
    }
}

/// Wrap `needle` in `%` after escaping `LIKE` metacharacters.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Build the company listing statement.
///
/// Predicates, in order: `name ILIKE`, `num_employees >=`,
/// `num_employees <=`. Fails with [`SqlBuildError::InvertedRange`] when both
/// bounds are present and `min_employees > max_employees`.
///
/// # Examples
/// ```
/// use jobly::domain::CompanyFilter;
/// use jobly::outbound::persistence::sql::company_filter_query;
///
/// let query = company_filter_query(&CompanyFilter::default()).unwrap();
/// assert_eq!(
///     query.sql,
///     "SELECT handle, name, description, num_employees, logo_url FROM companies ORDER BY name"
/// );
/// ```
pub fn company_filter_query(filter: &CompanyFilter) -> Result<FilterQuery, SqlBuildError> {
    if matches!(
        (filter.min_employees, filter.max_employees),
        (Some(min), Some(max)) if min > max
    ) {
        return Err(SqlBuildError::InvertedRange {
            min_field: "minEmployees",
            max_field: "maxEmployees",
        });
    }

    let mut predicates = Predicates::default();
    predicates.push_substring("name", filter.name.as_deref());
    if let Some(min) = filter.min_employees {
        predicates.push("num_employees", ">=", SqlValue::integer(min));
    }
    if let Some(max) = filter.max_employees {
        predicates.push("num_employees", "<=", SqlValue::integer(max));
    }
    Ok(predicates.finish(COMPANY_SELECT, "name"))
}

/// Build the job listing statement.
///
/// Predicates, in order: `title ILIKE`, `salary >=`, `equity > 0` (only when
/// `has_equity` is set).
pub fn job_filter_query(filter: &JobFilter) -> FilterQuery {
    let mut predicates = Predicates::default();
    predicates.push_substring("title", filter.title.as_deref());
    if let Some(min) = filter.min_salary {
        predicates.push("salary", ">=", SqlValue::integer(min));
    }
    if filter.has_equity {
        predicates.push("equity", ">", SqlValue::numeric(BigDecimal::from(0)));
    }
    predicates.finish(JOB_SELECT, "title")
}
