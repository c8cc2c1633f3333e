//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Rows read through dynamic
//! statements (`sql_query`) derive `QueryableByName`; rows read through the
//! typed DSL derive `Queryable` and `Selectable`.

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::domain::{
    Company, CompanyHandle, Equity, Job, JobId, JobSummary, JobValidationError,
};

use super::schema::{companies, jobs};

/// Row struct for reading from the companies table.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Insertable struct for creating company records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub handle: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub num_employees: Option<i32>,
    pub logo_url: Option<&'a str>,
}

impl<'a> From<&'a Company> for NewCompanyRow<'a> {
    fn from(company: &'a Company) -> Self {
        Self {
            handle: company.handle().as_ref(),
            name: company.name(),
            description: company.description(),
            num_employees: company.num_employees(),
            logo_url: company.logo_url(),
        }
    }
}

impl TryFrom<CompanyRow> for Company {
    type Error = String;

    fn try_from(row: CompanyRow) -> Result<Self, Self::Error> {
        let handle = CompanyHandle::new(row.handle).map_err(|err| err.to_string())?;
        Self::try_new(
            handle,
            row.name,
            row.description,
            row.num_employees,
            row.logo_url,
        )
        .map_err(|err| format!("invalid company row: {err}"))
    }
}

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// Insertable struct for creating job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub title: &'a str,
    pub salary: Option<i32>,
    pub equity: Option<&'a BigDecimal>,
    pub company_handle: &'a str,
}

fn equity_from_column(value: Option<BigDecimal>) -> Result<Option<Equity>, JobValidationError> {
    value.map(Equity::new).transpose()
}

impl TryFrom<JobRow> for Job {
    type Error = String;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let equity = equity_from_column(row.equity).map_err(|err| format!("invalid job row: {err}"))?;
        let company_handle =
            CompanyHandle::new(row.company_handle).map_err(|err| format!("invalid job row: {err}"))?;
        Ok(Self {
            id: JobId::new(row.id),
            title: row.title,
            salary: row.salary,
            equity,
            company_handle,
        })
    }
}

impl TryFrom<JobRow> for JobSummary {
    type Error = String;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Job::try_from(row).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage.
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn job_row(equity: Option<&str>) -> JobRow {
        JobRow {
            id: 1,
            title: "Full Stack Developer".to_owned(),
            salary: Some(100_000),
            equity: equity.map(|raw| BigDecimal::from_str(raw).expect("decimal")),
            company_handle: "c1".to_owned(),
        }
    }

    #[rstest]
    fn job_row_converts_with_exact_equity() {
        let job = Job::try_from(job_row(Some("0.5"))).expect("valid row");
        assert_eq!(job.id, JobId::new(1));
        assert_eq!(job.equity.map(|e| e.to_string()).as_deref(), Some("0.5"));
        assert_eq!(job.company_handle.as_ref(), "c1");
    }

    #[rstest]
    fn job_row_rejects_out_of_range_equity() {
        let err = Job::try_from(job_row(Some("2"))).expect_err("out of range");
        assert!(err.contains("equity"));
    }

    #[rstest]
    fn company_row_round_trips_into_insert_row() {
        let row = CompanyRow {
            handle: "c1".to_owned(),
            name: "C1".to_owned(),
            description: "Desc1".to_owned(),
            num_employees: Some(1),
            logo_url: Some("http://c1.img".to_owned()),
        };
        let company = Company::try_from(row).expect("valid row");
        let insert = NewCompanyRow::from(&company);
        assert_eq!(insert.handle, "c1");
        assert_eq!(insert.logo_url, Some("http://c1.img"));
    }
}
