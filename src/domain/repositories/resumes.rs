use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{
    resume_revisions::ResumeRevisionEntity,
    resumes::{EditResumeEntity, InsertResumeEntity, ResumeEntity},
};

/// All lookups are scoped to the owning subject; a resume belonging to
/// someone else behaves exactly like a missing one.
#[automock]
#[async_trait]
pub trait ResumeRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeEntity>>;
    async fn find(&self, user_id: Uuid, resume_id: Uuid) -> Result<Option<ResumeEntity>>;
    async fn create(&self, insert_resume_entity: InsertResumeEntity) -> Result<ResumeEntity>;
    async fn update(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        edit_resume_entity: EditResumeEntity,
    ) -> Result<Option<ResumeEntity>>;
    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> Result<bool>;
    async fn count(&self, user_id: Uuid) -> Result<i64>;

    /// Assigns the next revision number under a lock on the parent resume
    /// row; `None` when the resume is not visible to the subject.
    async fn create_revision(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        changes: Value,
    ) -> Result<Option<ResumeRevisionEntity>>;

    async fn list_revisions(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<Vec<ResumeRevisionEntity>>>;
}
