use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::job_matches::{InsertJobMatchEntity, JobMatchEntity},
    value_objects::job_matches::JobMatchFilter,
};

#[automock]
#[async_trait]
pub trait JobMatchRepository {
    async fn insert_many(&self, entities: Vec<InsertJobMatchEntity>) -> Result<usize>;

    /// Ordered by match score descending, then creation time descending.
    async fn list(&self, user_id: Uuid, filter: &JobMatchFilter) -> Result<Vec<JobMatchEntity>>;

    async fn mark_applied(
        &self,
        user_id: Uuid,
        job_match_id: Uuid,
    ) -> Result<Option<JobMatchEntity>>;

    async fn mark_saved(&self, user_id: Uuid, job_match_id: Uuid)
    -> Result<Option<JobMatchEntity>>;

    async fn count(&self, user_id: Uuid) -> Result<i64>;
}
