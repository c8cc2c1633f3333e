//! Integration tests for `DieselJobRepository` against PostgreSQL.

use jobly::domain::ports::{CompanyRepository, JobRepository, JobRepositoryError};
use jobly::domain::{
    Company, CompanyHandle, Job, JobFilter, JobId, JobPatch, JobPatchDraft, NewJob,
};
use jobly::outbound::persistence::{DbPool, DieselCompanyRepository, DieselJobRepository};
use rstest::rstest;

#[macro_use]
mod support;

use support::{company, handle, unique_token};

async fn seed_company(pool: &DbPool, token: &str) -> Company {
    let c1 = company(token, "c1", Some(1));
    DieselCompanyRepository::new(pool.clone())
        .create(&c1)
        .await
        .expect("seed company")
}

fn new_job(title: &str, salary: Option<i32>, equity: Option<&str>, owner: &CompanyHandle) -> NewJob {
    NewJob::try_new(
        title,
        salary,
        equity.map(|raw| raw.parse().expect("valid equity")),
        owner.clone(),
    )
    .expect("valid job")
}

fn equity_text(job: &Job) -> Option<String> {
    job.equity.as_ref().map(ToString::to_string)
}

#[rstest]
#[tokio::test]
async fn create_returns_generated_id_and_fields_verbatim() {
    let pool = require_pool!();
    let owner = seed_company(&pool, &unique_token()).await;
    let repo = DieselJobRepository::new(pool);

    let job = repo
        .create(&new_job(
            "Full Stack Developer",
            Some(100_000),
            Some("0.5"),
            owner.handle(),
        ))
        .await
        .expect("create");

    assert!(job.id.get() > 0);
    assert_eq!(job.title, "Full Stack Developer");
    assert_eq!(job.salary, Some(100_000));
    assert_eq!(equity_text(&job).as_deref(), Some("0.5"));
    assert_eq!(&job.company_handle, owner.handle());

    let fetched = repo.get(job.id).await.expect("get");
    assert_eq!(fetched, job);
}

#[rstest]
#[tokio::test]
async fn small_equity_reads_back_in_decimal_notation() {
    let pool = require_pool!();
    let owner = seed_company(&pool, &unique_token()).await;
    let repo = DieselJobRepository::new(pool);

    let job = repo
        .create(&new_job("Intern", None, Some("0.0000001"), owner.handle()))
        .await
        .expect("create");
    let fetched = repo.get(job.id).await.expect("get");

    assert_eq!(equity_text(&fetched).as_deref(), Some("0.0000001"));
    let body = serde_json::to_value(&fetched).expect("serialize job");
    assert_eq!(body["equity"], "0.0000001");
}

#[rstest]
#[tokio::test]
async fn create_for_unknown_company_is_rejected() {
    let pool = require_pool!();
    let repo = DieselJobRepository::new(pool);
    let missing = handle(&unique_token());

    let err = repo
        .create(&new_job("Orphan", None, None, &missing))
        .await
        .expect_err("unknown company");
    assert_eq!(err, JobRepositoryError::unknown_company(missing.as_ref()));
}

#[rstest]
#[tokio::test]
async fn update_changes_editable_fields_and_keeps_company() {
    let pool = require_pool!();
    let owner = seed_company(&pool, &unique_token()).await;
    let repo = DieselJobRepository::new(pool);
    let job = repo
        .create(&new_job(
            "Full Stack Developer",
            Some(100_000),
            Some("0.5"),
            owner.handle(),
        ))
        .await
        .expect("seed job");

    let patch = JobPatch::try_from(JobPatchDraft {
        title: Some("Junior Developer".to_owned()),
        salary: Some(Some(90_000)),
        equity: Some(Some("0.1".parse().expect("equity"))),
        ..JobPatchDraft::default()
    })
    .expect("valid patch");
    let updated = repo.update(job.id, &patch).await.expect("update");

    assert_eq!(updated.id, job.id);
    assert_eq!(updated.title, "Junior Developer");
    assert_eq!(updated.salary, Some(90_000));
    assert_eq!(equity_text(&updated).as_deref(), Some("0.1"));
    assert_eq!(&updated.company_handle, owner.handle());
}

#[rstest]
#[tokio::test]
async fn immutable_fields_are_rejected_before_any_write() {
    let pool = require_pool!();
    let owner = seed_company(&pool, &unique_token()).await;
    let repo = DieselJobRepository::new(pool);
    let job = repo
        .create(&new_job("Engineer", Some(100_000), None, owner.handle()))
        .await
        .expect("seed job");

    let attempt = JobPatch::try_from(JobPatchDraft {
        title: Some("Changed".to_owned()),
        company_handle_supplied: true,
        ..JobPatchDraft::default()
    });
    assert!(attempt.is_err());

    let unchanged = repo.get(job.id).await.expect("get");
    assert_eq!(unchanged, job);
}

#[rstest]
#[tokio::test]
async fn list_applies_min_salary_and_equity_filters() {
    let pool = require_pool!();
    let token = unique_token();
    let owner = seed_company(&pool, &token).await;
    let repo = DieselJobRepository::new(pool);
    let low = repo
        .create(&new_job(&format!("{token} b"), Some(100_000), Some("0.5"), owner.handle()))
        .await
        .expect("seed low");
    let high = repo
        .create(&new_job(&format!("{token} a"), Some(120_000), Some("0"), owner.handle()))
        .await
        .expect("seed high");

    let by_salary = repo
        .list(&JobFilter {
            title: Some(token.clone()),
            min_salary: Some(110_000),
            has_equity: false,
        })
        .await
        .expect("list by salary");
    assert_eq!(by_salary, vec![high.clone()]);

    let with_equity = repo
        .list(&JobFilter {
            title: Some(token.clone()),
            has_equity: true,
            ..JobFilter::default()
        })
        .await
        .expect("list by equity");
    assert_eq!(with_equity, vec![low.clone()]);

    let all = repo
        .list(&JobFilter {
            title: Some(token),
            ..JobFilter::default()
        })
        .await
        .expect("list by title");
    assert_eq!(all, vec![high, low]);
}

#[rstest]
#[tokio::test]
async fn remove_deletes_once_then_reports_not_found() {
    let pool = require_pool!();
    let owner = seed_company(&pool, &unique_token()).await;
    let repo = DieselJobRepository::new(pool);
    let job = repo
        .create(&new_job("Engineer", None, None, owner.handle()))
        .await
        .expect("seed job");

    repo.remove(job.id).await.expect("first remove");
    let err = repo.remove(job.id).await.expect_err("second remove");
    assert_eq!(err, JobRepositoryError::not_found(job.id.get()));
}

#[rstest]
#[tokio::test]
async fn missing_job_is_not_found_for_get_and_update() {
    let pool = require_pool!();
    let repo = DieselJobRepository::new(pool);
    let missing = JobId::new(0);
    let patch = JobPatch::try_from(JobPatchDraft {
        title: Some("Ghost".to_owned()),
        ..JobPatchDraft::default()
    })
    .expect("valid patch");

    assert_eq!(
        repo.get(missing).await.expect_err("get"),
        JobRepositoryError::not_found(0)
    );
    assert_eq!(
        repo.update(missing, &patch).await.expect_err("update"),
        JobRepositoryError::not_found(0)
    );
}
