use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    application::use_cases::webhook::ProcessedEventRepoTrait,
};

#[async_trait]
impl ProcessedEventRepoTrait for PostgresPersistence {
    async fn is_processed(&self, event_id: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM processed_webhook_events WHERE event_id = $1)",
        )
        .bind(event_id)
        .fetch_one(self.pool())
        .await?;

        Ok(exists)
    }

    async fn mark_processed(&self, event_id: &str, event_type: &str) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO processed_webhook_events (event_id, event_type)
               VALUES ($1, $2)
               ON CONFLICT (event_id) DO NOTHING"#,
        )
        .bind(event_id)
        .bind(event_type)
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
