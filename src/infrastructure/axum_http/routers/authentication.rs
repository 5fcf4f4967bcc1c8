use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    application::usecases::authentication::AuthenticationUseCase,
    auth::AuthUser,
    domain::{
        repositories::{
            packages::PackageRepository, subscriptions::SubscriptionRepository,
            users::UserRepository,
        },
        value_objects::iam::{LoginModel, RegisterUserModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            packages::PackagePostgres, subscriptions::SubscriptionPostgres, users::UserPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let package_repository = PackagePostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let authentication_usecase = AuthenticationUseCase::new(
        Arc::new(user_repository),
        Arc::new(package_repository),
        Arc::new(subscription_repository),
    );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(profile))
        .route("/onboarding/complete", post(complete_onboarding))
        .with_state(Arc::new(authentication_usecase))
}

pub async fn register<U, P, S>(
    State(authentication_usecase): State<Arc<AuthenticationUseCase<U, P, S>>>,
    Json(register_user_model): Json<RegisterUserModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match authentication_usecase.register(register_user_model).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn login<U, P, S>(
    State(authentication_usecase): State<Arc<AuthenticationUseCase<U, P, S>>>,
    Json(login_model): Json<LoginModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match authentication_usecase.login(login_model).await {
        Ok(access_token) => (StatusCode::OK, Json(access_token)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn profile<U, P, S>(
    State(authentication_usecase): State<Arc<AuthenticationUseCase<U, P, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match authentication_usecase.profile(auth.user_id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn complete_onboarding<U, P, S>(
    State(authentication_usecase): State<Arc<AuthenticationUseCase<U, P, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match authentication_usecase.complete_onboarding(auth.user_id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}
