use std::time::Duration;

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect to the store holding `creator_applications` and
/// `processed_webhook_events`.
pub async fn init_db(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .context("Entitlement store unreachable (check DATABASE_URL)")?;

    info!(max_connections = MAX_CONNECTIONS, "Connected to entitlement store");
    Ok(pool)
}
