use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::job_matches::{InsertJobMatchEntity, JobMatchEntity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobMatchModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_details: Value,
    pub match_score: i32,
    pub location: String,
    pub applied_at: Option<DateTime<Utc>>,
    pub saved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<JobMatchEntity> for JobMatchModel {
    fn from(value: JobMatchEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            job_details: value.job_details,
            match_score: value.match_score,
            location: value.location,
            applied_at: value.applied_at,
            saved_at: value.saved_at,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertJobMatchModel {
    pub job_details: Value,
    pub match_score: i32,
    pub location: String,
}

impl InsertJobMatchModel {
    pub fn to_entity(&self, user_id: Uuid) -> InsertJobMatchEntity {
        InsertJobMatchEntity {
            user_id,
            job_details: self.job_details.clone(),
            match_score: self.match_score,
            location: self.location.clone(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobMatchFilter {
    pub location: Option<String>,
    pub min_score: Option<i32>,
}
