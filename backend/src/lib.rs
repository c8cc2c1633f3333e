//! Jobly backend library: a job board of companies and their postings.
//!
//! Layout follows a ports-and-adapters split: [`domain`] holds the entities
//! and port traits, [`inbound`] the HTTP adapter and [`outbound`] the
//! PostgreSQL adapter.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
