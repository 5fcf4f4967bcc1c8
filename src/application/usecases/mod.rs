pub mod authentication;
pub mod dashboard;
pub mod entitlements;
pub mod errors;
pub mod job_matches;
pub mod resumes;
pub mod subscriptions;
