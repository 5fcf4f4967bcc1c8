use serde::Serialize;

use crate::domain::value_objects::{
    enums::usage_resources::UsageResource,
    packages::UNLIMITED,
};

/// Outcome of comparing a subject's current usage to the effective package
/// limit for one resource. Denials surface `limit` and `current` so clients
/// can render an upgrade prompt.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntitlementDecision {
    pub resource: UsageResource,
    pub allowed: bool,
    pub limit: i32,
    pub current: i32,
}

impl EntitlementDecision {
    pub fn decide(resource: UsageResource, limit: i32, current: i32) -> Self {
        Self {
            resource,
            allowed: limit == UNLIMITED || current < limit,
            limit,
            current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_allows() {
        let decision = EntitlementDecision::decide(UsageResource::JobsViewed, UNLIMITED, 1_000_000);
        assert!(decision.allowed);
    }

    #[test]
    fn at_limit_denies_with_matching_numbers() {
        let decision = EntitlementDecision::decide(UsageResource::ResumesCreated, 1, 1);
        assert!(!decision.allowed);
        assert_eq!(decision.limit, decision.current);
    }

    #[test]
    fn zero_limit_denies_first_use() {
        let decision = EntitlementDecision::decide(UsageResource::RevisionsUsed, 0, 0);
        assert!(!decision.allowed);
    }
}
