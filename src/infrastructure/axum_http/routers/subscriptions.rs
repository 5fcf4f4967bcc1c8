use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    application::usecases::subscriptions::SubscriptionUseCase,
    auth::AuthUser,
    domain::{
        repositories::{packages::PackageRepository, subscriptions::SubscriptionRepository},
        value_objects::subscriptions::UpgradeSubscriptionModel,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{packages::PackagePostgres, subscriptions::SubscriptionPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let package_repository = PackagePostgres::new(Arc::clone(&db_pool));
    let subscription_usecase = SubscriptionUseCase::new(
        Arc::new(subscription_repository),
        Arc::new(package_repository),
    );

    Router::new()
        .route("/packages", get(list_packages))
        .route("/current", get(current))
        .route("/upgrade", post(upgrade))
        .route("/cancel", post(cancel))
        .route("/history", get(history))
        .route("/payments", get(payments))
        .with_state(Arc::new(subscription_usecase))
}

/// Public catalog; the only unauthenticated route in this module.
pub async fn list_packages<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    match subscription_usecase.list_packages().await {
        Ok(packages) => (StatusCode::OK, Json(packages)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn current<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    match subscription_usecase.current(auth.user_id).await {
        Ok(subscription) => (StatusCode::OK, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn upgrade<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
    Json(upgrade_subscription_model): Json<UpgradeSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    match subscription_usecase
        .upgrade(auth.user_id, upgrade_subscription_model)
        .await
    {
        Ok(subscription) => (StatusCode::OK, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn cancel<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    match subscription_usecase.cancel(auth.user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn history<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    match subscription_usecase.history(auth.user_id).await {
        Ok(subscriptions) => (StatusCode::OK, Json(subscriptions)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn payments<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    match subscription_usecase.payments(auth.user_id).await {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(err) => err.into_response(),
    }
}
