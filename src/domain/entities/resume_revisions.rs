use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::resume_revisions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = resume_revisions)]
pub struct ResumeRevisionEntity {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub revision_number: i32,
    pub changes: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resume_revisions)]
pub struct InsertResumeRevisionEntity {
    pub resume_id: Uuid,
    pub revision_number: i32,
    pub changes: Value,
    pub created_at: DateTime<Utc>,
}
