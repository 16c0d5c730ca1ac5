use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::webhook::EntitlementRepoTrait,
    domain::entities::entitlement::{Entitlement, SubscriptionStatus},
};

const SELECT_COLS: &str = "id, user_id, subscription_status, subscription_expires_at, updated_at";

#[async_trait]
impl EntitlementRepoTrait for PostgresPersistence {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Vec<Entitlement>> {
        // LIMIT 2 is enough to tell "unique" from "ambiguous".
        let recs = sqlx::query_as::<_, Entitlement>(&format!(
            "SELECT {} FROM creator_applications WHERE user_id = $1 ORDER BY id LIMIT 2",
            SELECT_COLS
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(recs)
    }

    async fn activate_until(&self, id: Uuid, expires_at: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query(
            r#"UPDATE creator_applications
               SET subscription_status = $2,
                   subscription_expires_at = $3,
                   updated_at = NOW()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(SubscriptionStatus::Active)
        .bind(expires_at)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
