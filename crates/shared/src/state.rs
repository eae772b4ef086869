use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynHashing, DynJwtService},
    cache::CacheStore,
    config::{ConnectionPool, Hashing, JwtConfig},
    utils::{DependenciesInject, Metrics, SystemMetrics, run_metrics_collector},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Arc<Mutex<Metrics>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl AppState {
    pub async fn new(pool: ConnectionPool, jwt_secret: &str, cache: CacheStore) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService;
        let hashing = Arc::new(Hashing::new()) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Mutex::new(Metrics::new()));
        let system_metrics = Arc::new(SystemMetrics::new());

        {
            let mut registry = registry.lock().await;
            registry.register_metrics(&system_metrics);
            metrics.lock().await.register(&mut registry);
        }

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        let di_container = DependenciesInject::new(
            pool,
            hashing,
            jwt_config.clone(),
            Arc::new(cache),
            metrics.clone(),
        );

        Self {
            di_container,
            jwt_config,
            registry,
            metrics,
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
