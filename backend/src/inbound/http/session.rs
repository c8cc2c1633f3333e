//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting the logged-in user or
//! demanding administrator rights.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthenticatedUser, Error};

pub(crate) const USER_KEY: &str = "user";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_KEY, user)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user from the session, if present.
    ///
    /// A cookie whose payload no longer decodes is treated as anonymous.
    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        match self.0.get::<AuthenticatedUser>(USER_KEY) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable session identity");
                None
            }
        }
    }

    /// Require a logged-in user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<AuthenticatedUser, Error> {
        self.current_user()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an administrator: `401` when anonymous, `403` otherwise.
    pub fn require_admin(&self) -> Result<AuthenticatedUser, Error> {
        let user = self.require_user()?;
        if user.is_admin {
            Ok(user)
        } else {
            Err(Error::forbidden("administrator rights required"))
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
