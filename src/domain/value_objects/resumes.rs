use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    entities::resumes::{EditResumeEntity, InsertResumeEntity, ResumeEntity},
    entities::resume_revisions::ResumeRevisionEntity,
    value_objects::enums::resume_statuses::ResumeStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeEntity> for ResumeModel {
    fn from(value: ResumeEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            content: value.content,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResumeModel {
    pub title: String,
    pub content: Value,
    pub status: Option<String>,
}

impl InsertResumeModel {
    pub fn to_entity(&self, user_id: Uuid) -> InsertResumeEntity {
        let now = Utc::now();
        InsertResumeEntity {
            user_id,
            title: self.title.clone(),
            content: self.content.clone(),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| ResumeStatus::Draft.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditResumeModel {
    pub title: Option<String>,
    pub content: Option<Value>,
    pub status: Option<String>,
}

impl EditResumeModel {
    pub fn to_entity(&self) -> EditResumeEntity {
        EditResumeEntity {
            title: self.title.clone(),
            content: self.content.clone(),
            status: self.status.clone(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeRevisionModel {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub revision_number: i32,
    pub changes: Value,
    pub created_at: DateTime<Utc>,
}

impl From<ResumeRevisionEntity> for ResumeRevisionModel {
    fn from(value: ResumeRevisionEntity) -> Self {
        Self {
            id: value.id,
            resume_id: value.resume_id,
            revision_number: value.revision_number,
            changes: value.changes,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRevisionModel {
    pub changes: Value,
}
