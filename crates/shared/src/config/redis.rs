use anyhow::{Context, Result};
use redis::Client;

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

impl RedisConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct RedisClient {
    pub client: Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())
            .with_context(|| format!("Invalid Redis URL: {}", config.url))?;

        Ok(Self { client })
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to open Redis connection")?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis PING failed")?;

        Ok(())
    }
}
