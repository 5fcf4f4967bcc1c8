pub mod dashboard;
pub mod entitlements;
pub mod enums;
pub mod iam;
pub mod job_matches;
pub mod packages;
pub mod resumes;
pub mod subscriptions;
pub mod usage_stats;
