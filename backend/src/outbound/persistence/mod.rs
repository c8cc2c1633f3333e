//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between rows and domain
//!   types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Dynamic SQL**: listings and partial updates are assembled by [`sql`]
//!   and executed with positional binds.
//!
//! # Example
//!
//! ```ignore
//! use jobly::outbound::persistence::{DbPool, DieselCompanyRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/jobly")).await?;
//! let companies = DieselCompanyRepository::new(pool);
//! ```

mod diesel_company_repository;
mod diesel_job_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;
pub mod sql;

pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
