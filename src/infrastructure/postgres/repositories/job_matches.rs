use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::job_matches::{InsertJobMatchEntity, JobMatchEntity},
        repositories::job_matches::JobMatchRepository,
        value_objects::job_matches::JobMatchFilter,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::job_matches},
};

pub struct JobMatchPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl JobMatchPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl JobMatchRepository for JobMatchPostgres {
    async fn insert_many(&self, entities: Vec<InsertJobMatchEntity>) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let inserted = insert_into(job_matches::table)
            .values(&entities)
            .execute(&mut conn)?;

        Ok(inserted)
    }

    async fn list(&self, user_id: Uuid, filter: &JobMatchFilter) -> Result<Vec<JobMatchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = job_matches::table
            .filter(job_matches::user_id.eq(user_id))
            .select(JobMatchEntity::as_select())
            .into_boxed();

        if let Some(location) = &filter.location {
            query = query.filter(job_matches::location.eq(location.clone()));
        }
        if let Some(min_score) = filter.min_score {
            query = query.filter(job_matches::match_score.ge(min_score));
        }

        let results = query
            .order((
                job_matches::match_score.desc(),
                job_matches::created_at.desc(),
            ))
            .load::<JobMatchEntity>(&mut conn)?;

        Ok(results)
    }

    async fn mark_applied(
        &self,
        user_id: Uuid,
        job_match_id: Uuid,
    ) -> Result<Option<JobMatchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(job_matches::table)
            .filter(job_matches::id.eq(job_match_id))
            .filter(job_matches::user_id.eq(user_id))
            .set(job_matches::applied_at.eq(Some(Utc::now())))
            .returning(JobMatchEntity::as_returning())
            .get_result::<JobMatchEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn mark_saved(
        &self,
        user_id: Uuid,
        job_match_id: Uuid,
    ) -> Result<Option<JobMatchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(job_matches::table)
            .filter(job_matches::id.eq(job_match_id))
            .filter(job_matches::user_id.eq(user_id))
            .set(job_matches::saved_at.eq(Some(Utc::now())))
            .returning(JobMatchEntity::as_returning())
            .get_result::<JobMatchEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn count(&self, user_id: Uuid) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = job_matches::table
            .filter(job_matches::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
