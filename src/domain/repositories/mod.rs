pub mod job_matches;
pub mod packages;
pub mod resumes;
pub mod subscriptions;
pub mod usage_stats;
pub mod users;
