//! Builders wiring persistence adapters into HTTP handler state.

use std::sync::Arc;

use jobly::domain::ports::FixtureLoginService;
use jobly::inbound::http::state::HttpState;
use jobly::outbound::persistence::{DbPool, DieselCompanyRepository, DieselJobRepository};

/// Build the handler state from a shared connection pool.
///
/// Both repositories hold clones of the same pool; login uses the fixture
/// accounts.
pub(crate) fn build_http_state(pool: &DbPool) -> HttpState {
    HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(DieselCompanyRepository::new(pool.clone())),
        Arc::new(DieselJobRepository::new(pool.clone())),
    )
}
