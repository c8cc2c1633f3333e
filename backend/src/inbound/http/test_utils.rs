//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::json;

use crate::domain::ports::{
    FixtureLoginService, MockCompanyRepository, MockJobRepository,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Log in through `POST /login` as one of the fixture accounts and return the
/// session cookie.
pub async fn login_cookie<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": username, "password": "password"}))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "fixture login failed");
    session_cookie(&response)
}

/// Application with every API route, the given state and a test session.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(configure)
}

/// Handler state backed by the fixture login service and repository mocks.
pub fn state_with(companies: MockCompanyRepository, jobs: MockJobRepository) -> HttpState {
    HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(companies),
        Arc::new(jobs),
    )
}
