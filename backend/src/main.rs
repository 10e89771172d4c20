//! itembox entry point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use itembox::inbound::http::health::HealthState;
use itembox::inbound::http::session_config::{BuildMode, session_settings_from_env};
use itembox::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use itembox::settings::AppSettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(session.key, session.cookie_secure, bind_addr)
        .with_seed_demo_users(settings.seed_demo_users)
        .with_empty_data_response(settings.empty_data_response());

    match settings.database_url() {
        Some(url) => {
            run_migrations(url).await.map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            info!("using PostgreSQL storage");
            config = config.with_db_pool(pool);
        }
        None => warn!("ITEMBOX_DATABASE_URL not set; items are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "listening");
    server.await
}
