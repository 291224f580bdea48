use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
///
/// Expected schema (append-only, unique on user + code):
///
/// ```sql
/// CREATE TABLE achievement_unlocks (
///     id               uuid PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id          uuid NOT NULL,
///     achievement_code text NOT NULL,
///     unlocked_at      timestamptz NOT NULL DEFAULT now(),
///     metadata         jsonb NOT NULL DEFAULT '{}',
///     UNIQUE (user_id, achievement_code)
/// );
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
