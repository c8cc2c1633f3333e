//! PostgreSQL-backed `JobRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{Job, JobFilter, JobId, JobPatch, NewJob};

use super::error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{JobRow, NewJobRow};
use super::pool::{DbPool, PoolError};
use super::schema::jobs;
use super::sql::{
    JobField, SqlBuildError, SqlValue, bind_values, job_filter_query, partial_update,
};

/// Diesel-backed implementation of the `JobRepository` port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> JobRepositoryError {
    JobRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: &diesel::result::Error) -> JobRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { .. } => JobRepositoryError::query("duplicate job"),
        DieselFailure::ForeignKeyViolation => {
            JobRepositoryError::invalid_input("job references a missing company")
        }
        DieselFailure::Connection(message) => JobRepositoryError::connection(message),
        DieselFailure::Query(message) => JobRepositoryError::query(message),
    }
}

fn row_to_job(row: JobRow) -> Result<Job, JobRepositoryError> {
    Job::try_from(row).map_err(JobRepositoryError::query)
}

/// Ordered column assignments for a job patch.
fn job_changes(patch: &JobPatch) -> Vec<(JobField, SqlValue)> {
    let mut changes = Vec::new();
    if let Some(title) = patch.title() {
        changes.push((JobField::Title, SqlValue::text(title)));
    }
    if let Some(salary) = patch.salary() {
        changes.push((JobField::Salary, SqlValue::Integer(salary)));
    }
    if let Some(equity) = patch.equity() {
        changes.push((
            JobField::Equity,
            SqlValue::Numeric(equity.map(|e| e.as_decimal().clone())),
        ));
    }
    changes
}

/// Assemble the `UPDATE jobs` statement and its binds.
fn update_statement(id: JobId, patch: &JobPatch) -> Result<(String, Vec<SqlValue>), SqlBuildError> {
    let clause = partial_update(job_changes(patch))?;
    let key = clause.next_placeholder();
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${key} RETURNING id, title, salary, equity, company_handle",
        clause.sql
    );
    let mut values = clause.values;
    values.push(SqlValue::integer(id.get()));
    Ok((sql, values))
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn create(&self, job: &NewJob) -> Result<Job, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewJobRow {
            title: job.title(),
            salary: job.salary(),
            equity: job.equity().map(|e| e.as_decimal()),
            company_handle: job.company_handle().as_ref(),
        };

        let row = diesel::insert_into(jobs::table)
            .values(&new_row)
            .returning(JobRow::as_returning())
            .get_result::<JobRow>(&mut conn)
            .await
            .map_err(|err| match map_diesel_error(&err) {
                JobRepositoryError::InvalidInput { .. } => {
                    JobRepositoryError::unknown_company(job.company_handle().as_ref())
                }
                other => other,
            })?;

        row_to_job(row)
    }

    async fn get(&self, id: JobId) -> Result<Job, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = jobs::table
            .find(id.get())
            .select(JobRow::as_select())
            .first::<JobRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?
            .ok_or_else(|| JobRepositoryError::not_found(id.get()))?;

        row_to_job(row)
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, JobRepositoryError> {
        let query = job_filter_query(filter);
        debug!(sql = %query.sql, binds = query.values.len(), "listing jobs");

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bind_values(diesel::sql_query(query.sql).into_boxed(), query.values)
            .load::<JobRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        rows.into_iter().map(row_to_job).collect()
    }

    async fn update(&self, id: JobId, patch: &JobPatch) -> Result<Job, JobRepositoryError> {
        let (sql, values) = update_statement(id, patch)
            .map_err(|err| JobRepositoryError::invalid_input(err.to_string()))?;
        debug!(%sql, %id, "updating job");

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bind_values(diesel::sql_query(sql).into_boxed(), values)
            .load::<JobRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        match rows.into_iter().next() {
            Some(row) => row_to_job(row),
            None => Err(JobRepositoryError::not_found(id.get())),
        }
    }

    async fn remove(&self, id: JobId) -> Result<(), JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(jobs::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        if deleted == 0 {
            return Err(JobRepositoryError::not_found(id.get()));
        }
        Ok(())
    }
}
