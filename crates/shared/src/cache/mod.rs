use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

/// JSON cache on top of Redis. Every failure is logged and reported as a
/// miss so a Redis outage only costs latency.
#[derive(Clone)]
pub struct CacheStore {
    client: Option<Client>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("enabled", &self.client.is_some())
            .finish()
    }
}

impl CacheStore {
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn disabled() -> Self {
        Self { client: None }
    }

    async fn connection(&self) -> Option<redis::aio::MultiplexedConnection> {
        let client = self.client.as_ref()?;

        match client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                warn!("Redis connection failed: {e}");
                None
            }
        }
    }

    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.connection().await?;

        let raw: Option<String> = match conn.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Redis GET failed for key {key}: {e}");
                return None;
            }
        };

        let raw = raw?;

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!("Cache hit for key: {key}");
                Some(value)
            }
            Err(e) => {
                warn!("Discarding undecodable cache entry {key}: {e}");
                None
            }
        }
    }

    pub async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize,
    {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize cache entry {key}: {e}");
                return;
            }
        };

        let result: redis::RedisResult<()> = conn.set_ex(key, json, expiration.as_secs()).await;

        if let Err(e) = result {
            warn!("Redis SETEX failed for key {key}: {e}");
        }
    }

    pub async fn delete_from_cache(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let result: redis::RedisResult<()> = conn.del(key).await;

        if let Err(e) = result {
            warn!("Redis DEL failed for key {key}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_store_always_misses() {
        let cache = CacheStore::disabled();
        cache
            .set_to_cache("users:all", &vec![1, 2, 3], Duration::from_secs(60))
            .await;

        assert!(cache.get_from_cache::<Vec<i32>>("users:all").await.is_none());
        cache.delete_from_cache("users:all").await;
    }
}
