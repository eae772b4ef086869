use anyhow::{Context, Result};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use tracing::info;

pub type ConnectionPool = Pool<Postgres>;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(connection_string: &str, run_migrations: bool) -> Result<ConnectionPool> {
        let pool = PgPoolOptions::new()
            .max_connections(30)
            .min_connections(2)
            .connect(connection_string)
            .await
            .context("Failed to connect to the database")?;

        if run_migrations {
            info!("Running database migrations...");
            sqlx::migrate!("../../migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Migrations completed successfully");
        }

        Ok(pool)
    }
}
