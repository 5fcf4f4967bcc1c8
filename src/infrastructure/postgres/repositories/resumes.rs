use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, delete, insert_into, prelude::*, update};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            resume_revisions::{InsertResumeRevisionEntity, ResumeRevisionEntity},
            resumes::{EditResumeEntity, InsertResumeEntity, ResumeEntity},
        },
        repositories::resumes::ResumeRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{resume_revisions, resumes},
    },
};

pub struct ResumePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ResumePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ResumeRepository for ResumePostgres {
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = resumes::table
            .filter(resumes::user_id.eq(user_id))
            .order(resumes::updated_at.desc())
            .select(ResumeEntity::as_select())
            .load::<ResumeEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find(&self, user_id: Uuid, resume_id: Uuid) -> Result<Option<ResumeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = resumes::table
            .filter(resumes::id.eq(resume_id))
            .filter(resumes::user_id.eq(user_id))
            .select(ResumeEntity::as_select())
            .first::<ResumeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(&self, insert_resume_entity: InsertResumeEntity) -> Result<ResumeEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(resumes::table)
            .values(&insert_resume_entity)
            .returning(ResumeEntity::as_returning())
            .get_result::<ResumeEntity>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        edit_resume_entity: EditResumeEntity,
    ) -> Result<Option<ResumeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(resumes::table)
            .filter(resumes::id.eq(resume_id))
            .filter(resumes::user_id.eq(user_id))
            .set(&edit_resume_entity)
            .returning(ResumeEntity::as_returning())
            .get_result::<ResumeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = conn.transaction::<bool, diesel::result::Error, _>(|conn| {
            let owned = resumes::table
                .filter(resumes::id.eq(resume_id))
                .filter(resumes::user_id.eq(user_id))
                .select(resumes::id)
                .for_update()
                .first::<Uuid>(conn)
                .optional()?;

            if owned.is_none() {
                return Ok(false);
            }

            // Revisions are retained until the parent resume goes away.
            delete(resume_revisions::table)
                .filter(resume_revisions::resume_id.eq(resume_id))
                .execute(conn)?;

            let rows = delete(resumes::table)
                .filter(resumes::id.eq(resume_id))
                .execute(conn)?;

            Ok(rows == 1)
        })?;

        Ok(deleted)
    }

    async fn count(&self, user_id: Uuid) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = resumes::table
            .filter(resumes::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn create_revision(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        changes: Value,
    ) -> Result<Option<ResumeRevisionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<Option<ResumeRevisionEntity>, diesel::result::Error, _>(
            |conn| {
                // Lock the parent row so concurrent revision creations take
                // numbers one at a time.
                let owned = resumes::table
                    .filter(resumes::id.eq(resume_id))
                    .filter(resumes::user_id.eq(user_id))
                    .select(resumes::id)
                    .for_update()
                    .first::<Uuid>(conn)
                    .optional()?;

                if owned.is_none() {
                    return Ok(None);
                }

                let max_number = resume_revisions::table
                    .filter(resume_revisions::resume_id.eq(resume_id))
                    .select(diesel::dsl::max(resume_revisions::revision_number))
                    .first::<Option<i32>>(conn)?;

                let revision = insert_into(resume_revisions::table)
                    .values(&InsertResumeRevisionEntity {
                        resume_id,
                        revision_number: max_number.unwrap_or(0) + 1,
                        changes,
                        created_at: Utc::now(),
                    })
                    .returning(ResumeRevisionEntity::as_returning())
                    .get_result::<ResumeRevisionEntity>(conn)?;

                Ok(Some(revision))
            },
        )?;

        Ok(result)
    }

    async fn list_revisions(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<Vec<ResumeRevisionEntity>>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let owned = resumes::table
            .filter(resumes::id.eq(resume_id))
            .filter(resumes::user_id.eq(user_id))
            .select(resumes::id)
            .first::<Uuid>(&mut conn)
            .optional()?;

        if owned.is_none() {
            return Ok(None);
        }

        let revisions = resume_revisions::table
            .filter(resume_revisions::resume_id.eq(resume_id))
            .order(resume_revisions::revision_number.asc())
            .select(ResumeRevisionEntity::as_select())
            .load::<ResumeRevisionEntity>(&mut conn)?;

        Ok(Some(revisions))
    }
}
