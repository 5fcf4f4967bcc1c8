use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::resumes;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = resumes)]
pub struct ResumeEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resumes)]
pub struct InsertResumeEntity {
    pub user_id: Uuid,
    pub title: String,
    pub content: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = resumes)]
pub struct EditResumeEntity {
    pub title: Option<String>,
    pub content: Option<Value>,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}
