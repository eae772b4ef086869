use anyhow::{Context, Result, anyhow};

const DEFAULT_OTEL_ENDPOINT: &str = "http://otel-collector:4317";

#[derive(Debug, Clone)]
pub struct OwnerBootstrap {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub metric_port: u16,
    pub redis_url: String,
    pub otel_endpoint: String,
    pub owner_bootstrap: Option<OwnerBootstrap>,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;

        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let metrics_port_str =
            std::env::var("METRIC_PORT").context("Missing environment variable: METRIC_PORT")?;

        let redis_url =
            std::env::var("REDIS_URL").context("Missing environment variable: REDIS_URL")?;

        let otel_endpoint = std::env::var("OTEL_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OTEL_ENDPOINT.to_string());

        let run_migrations = parse_bool("RUN_MIGRATIONS", &run_migrations_str)?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let metric_port = metrics_port_str
            .parse::<u16>()
            .context("METRIC_PORT must be a valid u16 integer")?;

        let owner_bootstrap = match (
            std::env::var("OWNER_USERNAME").ok(),
            std::env::var("OWNER_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(OwnerBootstrap { username, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            metric_port,
            redis_url,
            otel_endpoint,
            owner_bootstrap,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_migrations_accepts_only_literal_booleans() {
        assert!(parse_bool("RUN_MIGRATIONS", "true").unwrap());
        assert!(!parse_bool("RUN_MIGRATIONS", "false").unwrap());

        let err = parse_bool("RUN_MIGRATIONS", "yes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "RUN_MIGRATIONS must be 'true' or 'false', got 'yes'"
        );
    }
}
