use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use url::Url;

pub async fn init_db() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL env var not set")?;
    Url::parse(&database_url).context("invalid PostgreSQL URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Could not connect to the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Could not run database migrations")?;

    tracing::info!("database ready");

    Ok(pool)
}
