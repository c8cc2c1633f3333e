//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call [`LoginService`] to authenticate credentials without
//! knowing the backing infrastructure, so handler tests can substitute a
//! double.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

/// In-memory authenticator with two fixed accounts.
///
/// `admin` / `password` is an administrator; `user` / `password` is a
/// regular account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

const FIXTURE_PASSWORD: &str = "password";

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        if credentials.password() != FIXTURE_PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        match credentials.username() {
            "admin" => Ok(AuthenticatedUser::new("admin", true)),
            "user" => Ok(AuthenticatedUser::new("user", false)),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", Some(true))]
    #[case("user", "password", Some(false))]
    #[case("admin", "wrong", None)]
    #[case("other", "password", None)]
    #[tokio::test]
    async fn fixture_login_service_recognises_fixed_accounts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected_admin: Option<bool>,
    ) {
        let service = FixtureLoginService;
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        let result = service.authenticate(&creds).await;
        match (expected_admin, result) {
            (Some(is_admin), Ok(user)) => {
                assert_eq!(user.username, username);
                assert_eq!(user.is_admin, is_admin);
            }
            (None, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (Some(_), Err(err)) => panic!("expected success, got error: {err:?}"),
            (None, Ok(user)) => panic!("expected failure, got success: {user:?}"),
        }
    }
}
