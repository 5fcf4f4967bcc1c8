use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::job_matches;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = job_matches)]
pub struct JobMatchEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_details: Value,
    pub match_score: i32,
    pub location: String,
    pub applied_at: Option<DateTime<Utc>>,
    pub saved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_matches)]
pub struct InsertJobMatchEntity {
    pub user_id: Uuid,
    pub job_details: Value,
    pub match_score: i32,
    pub location: String,
    pub created_at: DateTime<Utc>,
}
