use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::{
    application::usecases::{dashboard::DashboardUseCase, entitlements::EntitlementResolver},
    auth::AuthUser,
    domain::repositories::{
        job_matches::JobMatchRepository, packages::PackageRepository, resumes::ResumeRepository,
        subscriptions::SubscriptionRepository, usage_stats::UsageStatsRepository,
        users::UserRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            job_matches::JobMatchPostgres, packages::PackagePostgres, resumes::ResumePostgres,
            subscriptions::SubscriptionPostgres, usage_stats::UsageStatsPostgres,
            users::UserPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let resume_repository = ResumePostgres::new(Arc::clone(&db_pool));
    let job_match_repository = JobMatchPostgres::new(Arc::clone(&db_pool));
    let package_repository = PackagePostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let usage_stats_repository = Arc::new(UsageStatsPostgres::new(Arc::clone(&db_pool)));

    let entitlement_resolver = Arc::new(EntitlementResolver::new(
        Arc::new(package_repository),
        Arc::new(subscription_repository),
        usage_stats_repository,
    ));
    let dashboard_usecase = DashboardUseCase::new(
        Arc::new(user_repository),
        Arc::new(resume_repository),
        Arc::new(job_match_repository),
        entitlement_resolver,
    );

    Router::new()
        .route("/", get(overview))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn overview<Usr, R, J, P, S, U>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<Usr, R, J, P, S, U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    Usr: UserRepository + Send + Sync + 'static,
    R: ResumeRepository + Send + Sync + 'static,
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match dashboard_usecase.overview(auth.user_id).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(err) => err.into_response(),
    }
}
