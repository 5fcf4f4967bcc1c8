pub mod job_matches;
pub mod packages;
pub mod payment_transactions;
pub mod resume_revisions;
pub mod resumes;
pub mod subscriptions;
pub mod usage_stats;
pub mod users;
