use anyhow::{Context, Result};
use dotenv::dotenv;
use kasir_server::handler::AppRouter;
use shared::{
    cache::CacheStore,
    config::{Config, ConnectionManager, RedisClient, RedisConfig},
    state::AppState,
    utils::{Telemetry, init_logger},
};
use tracing::{info, warn};

async fn connect_cache(redis_url: &str) -> CacheStore {
    let redis = match RedisClient::new(&RedisConfig::new(redis_url)) {
        Ok(redis) => redis,
        Err(e) => {
            warn!("Redis disabled: {e:#}");
            return CacheStore::disabled();
        }
    };

    match redis.ping().await {
        Ok(()) => CacheStore::new(redis.client),
        Err(e) => {
            warn!("Redis unreachable, running without cache: {e:#}");
            CacheStore::disabled()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("kasir-server", config.otel_endpoint.clone());

    let logger_provider = telemetry.init_logger()?;
    let _meter_provider = telemetry.init_meter()?;
    let _tracer_provider = telemetry.init_tracer()?;

    let _log_guard = init_logger(logger_provider, "kasir_server")?;

    let db_pool = ConnectionManager::new_pool(&config.database_url, config.run_migrations)
        .await
        .context("Failed to initialize database pool")?;

    let cache = connect_cache(&config.redis_url).await;

    let state = AppState::new(db_pool, &config.jwt_secret, cache).await;

    if let Some(owner) = &config.owner_bootstrap {
        let created = state
            .di_container
            .user_service
            .bootstrap_owner(&owner.username, &owner.password)
            .await
            .context("Failed to bootstrap owner account")?;

        if created {
            info!("Owner account {} created", owner.username);
        }
    }

    info!("🚀 Server started successfully");

    AppRouter::serve(config.port, config.metric_port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown().await?;

    Ok(())
}
