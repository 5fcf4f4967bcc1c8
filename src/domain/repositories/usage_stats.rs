use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::usage_stats::UsageStatsEntity,
    value_objects::enums::usage_resources::UsageResource,
};

#[automock]
#[async_trait]
pub trait UsageStatsRepository {
    async fn find(&self, user_id: Uuid, period_month: &str) -> Result<Option<UsageStatsEntity>>;

    /// Unconditional atomic upsert: creates the month row with the counter
    /// at 1, or bumps it by 1.
    async fn increment(
        &self,
        user_id: Uuid,
        period_month: &str,
        resource: UsageResource,
    ) -> Result<()>;

    /// Atomic check-and-increment. Returns false when the counter already
    /// sits at `limit`; a limit of -1 always consumes. Concurrent calls for
    /// the same subject and month serialize on the row, so the limit cannot
    /// be exceeded by racing requests.
    async fn try_consume(
        &self,
        user_id: Uuid,
        period_month: &str,
        resource: UsageResource,
        limit: i32,
    ) -> Result<bool>;
}
