//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API.

mod server;

use actix_web::cookie::Key;
use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jobly::inbound::http::health::HealthState;
use jobly::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use jobly::settings::ServerSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

fn load_session_key(settings: &ServerSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) if settings.session_allow_ephemeral() => {
            warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(std::io::Error::other(format!(
            "failed to read session key at {}: {e}",
            key_path.display()
        ))),
    }
}

async fn apply_migrations(database_url: String) -> std::io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations complete");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let database_url = settings.database_url().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let key = load_session_key(&settings)?;

    if settings.run_migrations() {
        apply_migrations(database_url.to_owned()).await?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(key, bind_addr, pool).with_cookie_secure(settings.cookie_secure());
    info!(addr = %config.bind_addr(), "starting jobly");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
