//! Shared helpers for database-backed integration tests.
//!
//! Suites run against `JOBLY_TEST_DATABASE_URL` when it is set. Otherwise they
//! start the shared embedded PostgreSQL cluster from `pg-embed-setup-unpriv`
//! and create one migrated database per test binary. Cluster failures panic
//! unless `SKIP_TEST_CLUSTER` is truthy, in which case the suite prints a skip
//! marker and returns early.

#![allow(dead_code, reason = "each suite uses a different subset")]

use std::sync::OnceLock;

use jobly::domain::{Company, CompanyHandle};
use jobly::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use uuid::Uuid;

const DATABASE_URL_VAR: &str = "JOBLY_TEST_DATABASE_URL";

static DATABASE_URL: OnceLock<Result<String, String>> = OnceLock::new();

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes"
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when opted in; otherwise fail so CI breakage is visible.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn external_database_url() -> Option<String> {
    std::env::var(DATABASE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

fn embedded_database_url() -> Result<String, String> {
    let cluster = pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("start embedded cluster: {err:?}"))?;
    let name = format!("jobly_test_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    Ok(cluster.connection().database_url(&name).to_string())
}

/// Resolve the database for this binary and apply migrations, once.
fn prepare_database() -> Result<String, String> {
    let url = match external_database_url() {
        Some(url) => url,
        None => embedded_database_url()?,
    };
    run_pending_migrations(&url).map_err(|err| err.to_string())?;
    Ok(url)
}

/// Build a small pool against the test database. Returns `None` only when
/// setup failed and `SKIP_TEST_CLUSTER` allows skipping.
pub async fn test_pool() -> Option<DbPool> {
    let prepared = tokio::task::spawn_blocking(|| {
        DATABASE_URL.get_or_init(prepare_database).clone()
    })
    .await
    .expect("database setup task joins");

    let url = match prepared {
        Ok(url) => url,
        Err(reason) => return handle_cluster_setup_failure(reason),
    };

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("test pool builds");
    Some(pool)
}

/// Short token unique to one test, used in handles and names so parallel
/// tests never see each other's rows.
pub fn unique_token() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("t{}", &simple[..12])
}

pub fn handle(raw: &str) -> CompanyHandle {
    CompanyHandle::new(raw).expect("valid handle")
}

/// Company named `"<token> <suffix>"` with handle `"<token>-<suffix>"`.
pub fn company(token: &str, suffix: &str, num_employees: Option<i32>) -> Company {
    Company::try_new(
        handle(&format!("{token}-{suffix}")),
        format!("{token} {suffix}"),
        format!("Desc {suffix}"),
        num_employees,
        Some(format!("http://{suffix}.img")),
    )
    .expect("valid company")
}

/// Skip the calling test only when cluster setup failed and skipping is
/// allowed.
macro_rules! require_pool {
    () => {
        match support::test_pool().await {
            Some(pool) => pool,
            None => return,
        }
    };
}

#[cfg(test)]
mod tests {
    //! Policy checks for the skip switch.

    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    #[case(Some("1"), true)]
    #[case(Some("YES"), true)]
    #[case(Some("true"), true)]
    #[case(Some("0"), false)]
    #[case(None, false)]
    fn skip_switch_accepts_truthy_values(#[case] value: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env([("SKIP_TEST_CLUSTER", value.map(str::to_owned))]);
        assert_eq!(should_skip_test_cluster(), expected);
    }

    #[rstest]
    fn setup_failure_panics_unless_skipping_is_enabled() {
        let _guard = lock_env([("SKIP_TEST_CLUSTER", None::<String>)]);
        let outcome = std::panic::catch_unwind(|| handle_cluster_setup_failure::<()>("no cluster"));
        assert!(outcome.is_err());
    }
}
