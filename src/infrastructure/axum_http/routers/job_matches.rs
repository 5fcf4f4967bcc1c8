use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    application::usecases::{entitlements::EntitlementResolver, job_matches::JobMatchUseCase},
    auth::AuthUser,
    config::{config_loader, stage::Stage},
    domain::{
        repositories::{
            job_matches::JobMatchRepository, packages::PackageRepository,
            subscriptions::SubscriptionRepository, usage_stats::UsageStatsRepository,
        },
        value_objects::job_matches::{InsertJobMatchModel, JobMatchFilter},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            job_matches::JobMatchPostgres, packages::PackagePostgres,
            subscriptions::SubscriptionPostgres, usage_stats::UsageStatsPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let job_match_repository = JobMatchPostgres::new(Arc::clone(&db_pool));
    let package_repository = PackagePostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let usage_stats_repository = Arc::new(UsageStatsPostgres::new(Arc::clone(&db_pool)));

    let entitlement_resolver = Arc::new(EntitlementResolver::new(
        Arc::new(package_repository),
        Arc::new(subscription_repository),
        Arc::clone(&usage_stats_repository),
    ));
    let job_match_usecase = JobMatchUseCase::new(
        Arc::new(job_match_repository),
        usage_stats_repository,
        entitlement_resolver,
    );

    let mut router = Router::new()
        .route("/", get(list))
        .route("/", post(ingest))
        .route("/:job_match_id/applied", post(mark_applied))
        .route("/:job_match_id/saved", post(mark_saved));

    if config_loader::get_stage() != Stage::Production {
        router = router.route("/demo-seed", post(seed_demo));
    }

    router.with_state(Arc::new(job_match_usecase))
}

pub async fn list<J, P, S, U>(
    State(job_match_usecase): State<Arc<JobMatchUseCase<J, P, S, U>>>,
    auth: AuthUser,
    Query(filter): Query<JobMatchFilter>,
) -> impl IntoResponse
where
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match job_match_usecase.list(auth.user_id, filter).await {
        Ok(matches) => (StatusCode::OK, Json(matches)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn ingest<J, P, S, U>(
    State(job_match_usecase): State<Arc<JobMatchUseCase<J, P, S, U>>>,
    auth: AuthUser,
    Json(insert_job_match_models): Json<Vec<InsertJobMatchModel>>,
) -> impl IntoResponse
where
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match job_match_usecase
        .ingest(auth.user_id, insert_job_match_models)
        .await
    {
        Ok(inserted) => (StatusCode::CREATED, Json(json!({ "inserted": inserted }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn mark_applied<J, P, S, U>(
    State(job_match_usecase): State<Arc<JobMatchUseCase<J, P, S, U>>>,
    auth: AuthUser,
    Path(job_match_id): Path<Uuid>,
) -> impl IntoResponse
where
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match job_match_usecase
        .mark_applied(auth.user_id, job_match_id)
        .await
    {
        Ok(job_match) => (StatusCode::OK, Json(job_match)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn mark_saved<J, P, S, U>(
    State(job_match_usecase): State<Arc<JobMatchUseCase<J, P, S, U>>>,
    auth: AuthUser,
    Path(job_match_id): Path<Uuid>,
) -> impl IntoResponse
where
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match job_match_usecase.mark_saved(auth.user_id, job_match_id).await {
        Ok(job_match) => (StatusCode::OK, Json(job_match)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn seed_demo<J, P, S, U>(
    State(job_match_usecase): State<Arc<JobMatchUseCase<J, P, S, U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match job_match_usecase.seed_demo(auth.user_id).await {
        Ok(inserted) => (StatusCode::CREATED, Json(json!({ "inserted": inserted }))).into_response(),
        Err(err) => err.into_response(),
    }
}
