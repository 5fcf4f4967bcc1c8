use serde::Serialize;

use crate::domain::value_objects::{entitlements::EntitlementDecision, iam::UserModel};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    pub user: UserModel,
    pub package_code: String,
    pub package_name: String,
    pub usage: Vec<EntitlementDecision>,
    pub resume_count: i64,
    pub job_match_count: i64,
}
