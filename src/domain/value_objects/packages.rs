use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::packages::PackageEntity, value_objects::enums::usage_resources::UsageResource,
};

/// Tier code of the package every subject falls back to when no
/// subscription row is active.
pub const FREE_PACKAGE_CODE: &str = "free";

/// Sentinel limit value meaning "no numeric cap".
pub const UNLIMITED: i32 = -1;

/// Per-resource caps attached to a package. Stored as JSONB in the database.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PackageLimits {
    #[serde(default)]
    pub resumes_created: Option<i32>,

    #[serde(default)]
    pub revisions_used: Option<i32>,

    #[serde(default)]
    pub jobs_viewed: Option<i32>,
}

impl PackageLimits {
    /// A limit missing from the catalog row counts as 0.
    pub fn limit_for(&self, resource: UsageResource) -> i32 {
        match resource {
            UsageResource::ResumesCreated => self.resumes_created,
            UsageResource::RevisionsUsed => self.revisions_used,
            UsageResource::JobsViewed => self.jobs_viewed,
        }
        .unwrap_or(0)
    }

    pub fn is_unlimited(&self, resource: UsageResource) -> bool {
        self.limit_for(resource) == UNLIMITED
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageModel {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price_minor: i32,
    pub limits: PackageLimits,
    pub is_active: bool,
}

impl From<PackageEntity> for PackageModel {
    fn from(value: PackageEntity) -> Self {
        Self {
            id: value.id,
            code: value.code,
            name: value.name,
            price_minor: value.price_minor,
            limits: value.limits,
            is_active: value.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_limit_counts_as_zero() {
        let limits = PackageLimits::default();
        assert_eq!(limits.limit_for(UsageResource::ResumesCreated), 0);
        assert!(!limits.is_unlimited(UsageResource::ResumesCreated));
    }

    #[test]
    fn negative_one_is_unlimited() {
        let limits = PackageLimits {
            jobs_viewed: Some(UNLIMITED),
            ..Default::default()
        };
        assert!(limits.is_unlimited(UsageResource::JobsViewed));
    }
}
