use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::{entitlements::EntitlementResolver, resumes::ResumeUseCase},
    auth::AuthUser,
    domain::{
        repositories::{
            packages::PackageRepository, resumes::ResumeRepository,
            subscriptions::SubscriptionRepository, usage_stats::UsageStatsRepository,
        },
        value_objects::resumes::{CreateRevisionModel, EditResumeModel, InsertResumeModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            packages::PackagePostgres, resumes::ResumePostgres,
            subscriptions::SubscriptionPostgres, usage_stats::UsageStatsPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let resume_repository = ResumePostgres::new(Arc::clone(&db_pool));
    let package_repository = PackagePostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let usage_stats_repository = Arc::new(UsageStatsPostgres::new(Arc::clone(&db_pool)));

    let entitlement_resolver = Arc::new(EntitlementResolver::new(
        Arc::new(package_repository),
        Arc::new(subscription_repository),
        Arc::clone(&usage_stats_repository),
    ));
    let resume_usecase = ResumeUseCase::new(
        Arc::new(resume_repository),
        usage_stats_repository,
        entitlement_resolver,
    );

    Router::new()
        .route("/", get(list))
        .route("/", post(create))
        .route("/:resume_id", get(get_by_id))
        .route("/:resume_id", patch(update))
        .route("/:resume_id", delete(remove))
        .route("/:resume_id/revisions", get(list_revisions))
        .route("/:resume_id/revisions", post(create_revision))
        .with_state(Arc::new(resume_usecase))
}

pub async fn list<R, P, S, U>(
    State(resume_usecase): State<Arc<ResumeUseCase<R, P, S, U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match resume_usecase.list(auth.user_id).await {
        Ok(resumes) => (StatusCode::OK, Json(resumes)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_by_id<R, P, S, U>(
    State(resume_usecase): State<Arc<ResumeUseCase<R, P, S, U>>>,
    auth: AuthUser,
    Path(resume_id): Path<Uuid>,
) -> impl IntoResponse
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match resume_usecase.get(auth.user_id, resume_id).await {
        Ok(resume) => (StatusCode::OK, Json(resume)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create<R, P, S, U>(
    State(resume_usecase): State<Arc<ResumeUseCase<R, P, S, U>>>,
    auth: AuthUser,
    Json(insert_resume_model): Json<InsertResumeModel>,
) -> impl IntoResponse
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match resume_usecase.create(auth.user_id, insert_resume_model).await {
        Ok(resume) => (StatusCode::CREATED, Json(resume)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update<R, P, S, U>(
    State(resume_usecase): State<Arc<ResumeUseCase<R, P, S, U>>>,
    auth: AuthUser,
    Path(resume_id): Path<Uuid>,
    Json(edit_resume_model): Json<EditResumeModel>,
) -> impl IntoResponse
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match resume_usecase
        .update(auth.user_id, resume_id, edit_resume_model)
        .await
    {
        Ok(resume) => (StatusCode::OK, Json(resume)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn remove<R, P, S, U>(
    State(resume_usecase): State<Arc<ResumeUseCase<R, P, S, U>>>,
    auth: AuthUser,
    Path(resume_id): Path<Uuid>,
) -> impl IntoResponse
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match resume_usecase.delete(auth.user_id, resume_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_revision<R, P, S, U>(
    State(resume_usecase): State<Arc<ResumeUseCase<R, P, S, U>>>,
    auth: AuthUser,
    Path(resume_id): Path<Uuid>,
    Json(create_revision_model): Json<CreateRevisionModel>,
) -> impl IntoResponse
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match resume_usecase
        .create_revision(auth.user_id, resume_id, create_revision_model)
        .await
    {
        Ok(revision) => (StatusCode::CREATED, Json(revision)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_revisions<R, P, S, U>(
    State(resume_usecase): State<Arc<ResumeUseCase<R, P, S, U>>>,
    auth: AuthUser,
    Path(resume_id): Path<Uuid>,
) -> impl IntoResponse
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    match resume_usecase.list_revisions(auth.user_id, resume_id).await {
        Ok(revisions) => (StatusCode::OK, Json(revisions)).into_response(),
        Err(err) => err.into_response(),
    }
}
