use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::usage_stats::{InsertUsageStatsEntity, UsageStatsEntity},
        repositories::usage_stats::UsageStatsRepository,
        value_objects::{enums::usage_resources::UsageResource, packages::UNLIMITED},
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::usage_stats},
};

pub struct UsageStatsPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UsageStatsPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UsageStatsRepository for UsageStatsPostgres {
    async fn find(&self, user_id: Uuid, period_month: &str) -> Result<Option<UsageStatsEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = usage_stats::table
            .filter(usage_stats::user_id.eq(user_id))
            .filter(usage_stats::period_month.eq(period_month))
            .select(UsageStatsEntity::as_select())
            .first::<UsageStatsEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn increment(
        &self,
        user_id: Uuid,
        period_month: &str,
        resource: UsageResource,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let seeded = InsertUsageStatsEntity::seeded(user_id, period_month, resource);
        let now = Utc::now();

        match resource {
            UsageResource::ResumesCreated => {
                insert_into(usage_stats::table)
                    .values(&seeded)
                    .on_conflict((usage_stats::user_id, usage_stats::period_month))
                    .do_update()
                    .set((
                        usage_stats::resumes_created.eq(usage_stats::resumes_created + 1),
                        usage_stats::updated_at.eq(now),
                    ))
                    .execute(&mut conn)?;
            }
            UsageResource::RevisionsUsed => {
                insert_into(usage_stats::table)
                    .values(&seeded)
                    .on_conflict((usage_stats::user_id, usage_stats::period_month))
                    .do_update()
                    .set((
                        usage_stats::revisions_used.eq(usage_stats::revisions_used + 1),
                        usage_stats::updated_at.eq(now),
                    ))
                    .execute(&mut conn)?;
            }
            UsageResource::JobsViewed => {
                insert_into(usage_stats::table)
                    .values(&seeded)
                    .on_conflict((usage_stats::user_id, usage_stats::period_month))
                    .do_update()
                    .set((
                        usage_stats::jobs_viewed.eq(usage_stats::jobs_viewed + 1),
                        usage_stats::updated_at.eq(now),
                    ))
                    .execute(&mut conn)?;
            }
        }

        Ok(())
    }

    async fn try_consume(
        &self,
        user_id: Uuid,
        period_month: &str,
        resource: UsageResource,
        limit: i32,
    ) -> Result<bool> {
        if limit == UNLIMITED {
            self.increment(user_id, period_month, resource).await?;
            return Ok(true);
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;

        let now = Utc::now();
        let consumed = conn.transaction::<bool, diesel::result::Error, _>(|conn| {
            insert_into(usage_stats::table)
                .values(&InsertUsageStatsEntity::zeroed(user_id, period_month))
                .on_conflict((usage_stats::user_id, usage_stats::period_month))
                .do_nothing()
                .execute(conn)?;

            // Guarded increment: concurrent requests serialize on the row
            // lock, so the counter can never pass the limit.
            let affected = match resource {
                UsageResource::ResumesCreated => update(usage_stats::table)
                    .filter(usage_stats::user_id.eq(user_id))
                    .filter(usage_stats::period_month.eq(period_month))
                    .filter(usage_stats::resumes_created.lt(limit))
                    .set((
                        usage_stats::resumes_created.eq(usage_stats::resumes_created + 1),
                        usage_stats::updated_at.eq(now),
                    ))
                    .execute(conn)?,
                UsageResource::RevisionsUsed => update(usage_stats::table)
                    .filter(usage_stats::user_id.eq(user_id))
                    .filter(usage_stats::period_month.eq(period_month))
                    .filter(usage_stats::revisions_used.lt(limit))
                    .set((
                        usage_stats::revisions_used.eq(usage_stats::revisions_used + 1),
                        usage_stats::updated_at.eq(now),
                    ))
                    .execute(conn)?,
                UsageResource::JobsViewed => update(usage_stats::table)
                    .filter(usage_stats::user_id.eq(user_id))
                    .filter(usage_stats::period_month.eq(period_month))
                    .filter(usage_stats::jobs_viewed.lt(limit))
                    .set((
                        usage_stats::jobs_viewed.eq(usage_stats::jobs_viewed + 1),
                        usage_stats::updated_at.eq(now),
                    ))
                    .execute(conn)?,
            };

            Ok(affected == 1)
        })?;

        Ok(consumed)
    }
}
