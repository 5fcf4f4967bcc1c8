use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::enums::usage_resources::UsageResource,
    infrastructure::postgres::schema::usage_stats,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = usage_stats, primary_key(user_id, period_month))]
pub struct UsageStatsEntity {
    pub user_id: Uuid,
    pub period_month: String,
    pub resumes_created: i32,
    pub revisions_used: i32,
    pub jobs_viewed: i32,
    pub updated_at: DateTime<Utc>,
}

impl UsageStatsEntity {
    pub fn counter(&self, resource: UsageResource) -> i32 {
        match resource {
            UsageResource::ResumesCreated => self.resumes_created,
            UsageResource::RevisionsUsed => self.revisions_used,
            UsageResource::JobsViewed => self.jobs_viewed,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = usage_stats)]
pub struct InsertUsageStatsEntity {
    pub user_id: Uuid,
    pub period_month: String,
    pub resumes_created: i32,
    pub revisions_used: i32,
    pub jobs_viewed: i32,
    pub updated_at: DateTime<Utc>,
}

impl InsertUsageStatsEntity {
    /// Fresh row with all counters at zero.
    pub fn zeroed(user_id: Uuid, period_month: &str) -> Self {
        Self {
            user_id,
            period_month: period_month.to_string(),
            resumes_created: 0,
            revisions_used: 0,
            jobs_viewed: 0,
            updated_at: Utc::now(),
        }
    }

    /// Fresh row with the given counter already at one, used as the insert
    /// arm of the increment upsert.
    pub fn seeded(user_id: Uuid, period_month: &str, resource: UsageResource) -> Self {
        let mut entity = Self::zeroed(user_id, period_month);
        match resource {
            UsageResource::ResumesCreated => entity.resumes_created = 1,
            UsageResource::RevisionsUsed => entity.revisions_used = 1,
            UsageResource::JobsViewed => entity.jobs_viewed = 1,
        }
        entity
    }
}
