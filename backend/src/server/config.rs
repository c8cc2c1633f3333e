//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use jobly::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration around an existing connection pool.
    #[must_use]
    pub fn new(key: Key, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            key,
            cookie_secure: true,
            same_site: SameSite::Lax,
            bind_addr,
            db_pool,
        }
    }

    /// Control the `Secure` flag on the session cookie.
    #[must_use]
    pub fn with_cookie_secure(mut self, cookie_secure: bool) -> Self {
        self.cookie_secure = cookie_secure;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
