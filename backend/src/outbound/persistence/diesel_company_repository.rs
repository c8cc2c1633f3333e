//! PostgreSQL-backed `CompanyRepository` implementation using Diesel.
//!
//! Static statements (insert, lookup, delete) use the typed DSL. Listing and
//! partial updates run statements assembled by the `sql` builders through
//! `sql_query` with positional binds.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CompanyRepository, CompanyRepositoryError};
use crate::domain::{
    Company, CompanyDetail, CompanyFilter, CompanyHandle, CompanyPatch, JobSummary,
};

use super::error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{CompanyRow, JobRow, NewCompanyRow};
use super::pool::{DbPool, PoolError};
use super::schema::{companies, jobs};
use super::sql::{
    CompanyField, SqlBuildError, SqlValue, bind_values, company_filter_query, partial_update,
};

const RETURNING_COMPANY: &str = "RETURNING handle, name, description, num_employees, logo_url";

/// Unique constraint on `companies.name`.
const NAME_CONSTRAINT: &str = "companies_name_key";

/// Diesel-backed implementation of the `CompanyRepository` port.
#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
}

impl DieselCompanyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CompanyRepositoryError {
    CompanyRepositoryError::connection(error.into_message())
}

/// Map Diesel errors. Unique violations name the value that collided: `name`
/// when the name constraint fired and a name was written, otherwise `handle`.
fn map_diesel_error(
    error: &diesel::result::Error,
    handle: &str,
    name: Option<&str>,
) -> CompanyRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { constraint } => {
            match (constraint.as_deref(), name) {
                (Some(NAME_CONSTRAINT), Some(name)) => CompanyRepositoryError::duplicate_name(name),
                _ => CompanyRepositoryError::duplicate(handle),
            }
        }
        DieselFailure::ForeignKeyViolation => {
            CompanyRepositoryError::query("company is still referenced")
        }
        DieselFailure::Connection(message) => CompanyRepositoryError::connection(message),
        DieselFailure::Query(message) => CompanyRepositoryError::query(message),
    }
}

fn map_build_error(error: &SqlBuildError) -> CompanyRepositoryError {
    CompanyRepositoryError::invalid_input(error.to_string())
}

fn row_to_company(row: CompanyRow) -> Result<Company, CompanyRepositoryError> {
    Company::try_from(row).map_err(CompanyRepositoryError::query)
}

/// Ordered column assignments for a company patch.
fn company_changes(patch: &CompanyPatch) -> Vec<(CompanyField, SqlValue)> {
    let mut changes = Vec::new();
    if let Some(name) = patch.name() {
        changes.push((CompanyField::Name, SqlValue::text(name)));
    }
    if let Some(description) = patch.description() {
        changes.push((CompanyField::Description, SqlValue::text(description)));
    }
    if let Some(num_employees) = patch.num_employees() {
        changes.push((CompanyField::NumEmployees, SqlValue::Integer(num_employees)));
    }
    if let Some(logo_url) = patch.logo_url() {
        changes.push((
            CompanyField::LogoUrl,
            SqlValue::Text(logo_url.map(str::to_owned)),
        ));
    }
    changes
}

/// Assemble the `UPDATE companies` statement and its binds.
fn update_statement(
    handle: &CompanyHandle,
    patch: &CompanyPatch,
) -> Result<(String, Vec<SqlValue>), SqlBuildError> {
    let clause = partial_update(company_changes(patch))?;
    let key = clause.next_placeholder();
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${key} {RETURNING_COMPANY}",
        clause.sql
    );
    let mut values = clause.values;
    values.push(SqlValue::text(handle.as_ref()));
    Ok((sql, values))
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn create(&self, company: &Company) -> Result<Company, CompanyRepositoryError> {
        let handle = company.handle().as_ref();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let taken: bool = diesel::select(diesel::dsl::exists(companies::table.find(handle)))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, handle, None))?;
        if taken {
            return Err(CompanyRepositoryError::duplicate(handle));
        }

        let row = diesel::insert_into(companies::table)
            .values(NewCompanyRow::from(company))
            .returning(CompanyRow::as_returning())
            .get_result::<CompanyRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, handle, Some(company.name())))?;

        row_to_company(row)
    }

    async fn get(&self, handle: &CompanyHandle) -> Result<CompanyDetail, CompanyRepositoryError> {
        let key = handle.as_ref();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = companies::table
            .find(key)
            .select(CompanyRow::as_select())
            .first::<CompanyRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, key, None))?
            .ok_or_else(|| CompanyRepositoryError::not_found(key))?;

        let job_rows = jobs::table
            .filter(jobs::company_handle.eq(key))
            .order(jobs::id.asc())
            .select(JobRow::as_select())
            .load::<JobRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, key, None))?;

        let jobs = job_rows
            .into_iter()
            .map(|row| JobSummary::try_from(row).map_err(CompanyRepositoryError::query))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompanyDetail {
            company: row_to_company(row)?,
            jobs,
        })
    }

    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, CompanyRepositoryError> {
        let query = company_filter_query(filter).map_err(|err| map_build_error(&err))?;
        debug!(sql = %query.sql, binds = query.values.len(), "listing companies");

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bind_values(diesel::sql_query(query.sql).into_boxed(), query.values)
            .load::<CompanyRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "", None))?;

        rows.into_iter().map(row_to_company).collect()
    }

    async fn update(
        &self,
        handle: &CompanyHandle,
        patch: &CompanyPatch,
    ) -> Result<Company, CompanyRepositoryError> {
        let (sql, values) = update_statement(handle, patch).map_err(|err| map_build_error(&err))?;
        debug!(%sql, %handle, "updating company");

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bind_values(diesel::sql_query(sql).into_boxed(), values)
            .load::<CompanyRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, handle.as_ref(), patch.name()))?;

        match rows.into_iter().next() {
            Some(row) => row_to_company(row),
            None => Err(CompanyRepositoryError::not_found(handle.as_ref())),
        }
    }

    async fn remove(&self, handle: &CompanyHandle) -> Result<(), CompanyRepositoryError> {
        let key = handle.as_ref();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(companies::table.find(key))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, key, None))?;

        if deleted == 0 {
            return Err(CompanyRepositoryError::not_found(key));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Statement assembly coverage; database behaviour lives in `tests/`.
    use super::*;
    use rstest::rstest;

    fn handle() -> CompanyHandle {
        CompanyHandle::new("c1").expect("valid handle")
    }

    #[rstest]
    fn update_statement_appends_key_placeholder() {
        let patch = CompanyPatch::try_new(
            Some("New".to_owned()),
            None,
            Some(Some(10)),
            Some(None),
        )
        .expect("valid patch");
        let (sql, values) = update_statement(&handle(), &patch).expect("non-empty patch");
        assert_eq!(
            sql,
            "UPDATE companies SET \"name\"=$1, \"num_employees\"=$2, \"logo_url\"=$3 \
             WHERE handle = $4 RETURNING handle, name, description, num_employees, logo_url"
        );
        assert_eq!(
            values,
            vec![
                SqlValue::text("New"),
                SqlValue::integer(10),
                SqlValue::Text(None),
                SqlValue::text("c1"),
            ]
        );
    }

    #[rstest]
    fn empty_patch_fails_before_any_sql() {
        let err = update_statement(&handle(), &CompanyPatch::default()).expect_err("empty");
        assert_eq!(err, SqlBuildError::EmptyUpdate);
        assert_eq!(
            map_build_error(&err),
            CompanyRepositoryError::invalid_input("No data")
        );
    }

    #[rstest]
    fn inverted_range_maps_to_invalid_input() {
        let err = company_filter_query(&CompanyFilter {
            min_employees: Some(5),
            max_employees: Some(1),
            ..CompanyFilter::default()
        })
        .expect_err("inverted");
        assert!(matches!(
            map_build_error(&err),
            CompanyRepositoryError::InvalidInput { .. }
        ));
    }
}
