use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::Utc;
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    auth,
    domain::{
        entities::subscriptions::InsertSubscriptionEntity,
        repositories::{
            packages::PackageRepository, subscriptions::SubscriptionRepository,
            users::UserRepository,
        },
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus,
            iam::{AccessTokenModel, LoginModel, RegisterUserModel, UserModel},
            packages::FREE_PACKAGE_CODE,
        },
    },
};

use super::errors::{UseCaseError, UseCaseResult};

pub struct AuthenticationUseCase<U, P, S>
where
    U: UserRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    package_repository: Arc<P>,
    subscription_repository: Arc<S>,
}

impl<U, P, S> AuthenticationUseCase<U, P, S>
where
    U: UserRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        package_repository: Arc<P>,
        subscription_repository: Arc<S>,
    ) -> Self {
        Self {
            user_repository,
            package_repository,
            subscription_repository,
        }
    }

    pub async fn register(&self, register_user_model: RegisterUserModel) -> UseCaseResult<UserModel> {
        info!(email = %register_user_model.email, "authentication: register requested");

        if register_user_model.email.trim().is_empty() || !register_user_model.email.contains('@')
        {
            return Err(UseCaseError::InvalidInput("email".to_string()));
        }
        if register_user_model.password.len() < 6 {
            return Err(UseCaseError::InvalidInput(
                "password must be at least 6 characters".to_string(),
            ));
        }

        if self
            .user_repository
            .find_by_email(&register_user_model.email)
            .await
            .map_err(UseCaseError::Internal)?
            .is_some()
        {
            warn!(
                email = %register_user_model.email,
                status = UseCaseError::InvalidInput(String::new()).status_code().as_u16(),
                "authentication: email already registered"
            );
            return Err(UseCaseError::InvalidInput(
                "email is already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&register_user_model.password)?;

        let user = self
            .user_repository
            .register(register_user_model.to_entity(password_hash))
            .await
            .map_err(|err| {
                error!(
                    email = %register_user_model.email,
                    db_error = ?err,
                    "authentication: failed to create user"
                );
                UseCaseError::Internal(err)
            })?;

        self.open_free_subscription(user.id).await?;

        info!(user_id = %user.id, "authentication: user registered on free tier");
        Ok(UserModel::from(user))
    }

    pub async fn login(&self, login_model: LoginModel) -> UseCaseResult<AccessTokenModel> {
        let user = self
            .user_repository
            .find_by_email(&login_model.email)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or_else(|| {
                warn!(
                    email = %login_model.email,
                    status = UseCaseError::InvalidCredential.status_code().as_u16(),
                    "authentication: unknown email on login"
                );
                UseCaseError::InvalidCredential
            })?;

        if !verify_password(&login_model.password, &user.password_hash) {
            warn!(
                user_id = %user.id,
                status = UseCaseError::InvalidCredential.status_code().as_u16(),
                "authentication: password verification failed"
            );
            return Err(UseCaseError::InvalidCredential);
        }

        let (access_token, expires_in) =
            auth::issue_access_token(user.id, Some(user.email.clone())).map_err(|err| {
                error!(user_id = %user.id, error = ?err, "authentication: failed to issue token");
                UseCaseError::Internal(err)
            })?;

        info!(user_id = %user.id, "authentication: login succeeded");
        Ok(AccessTokenModel {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: UserModel::from(user),
        })
    }

    pub async fn profile(&self, user_id: Uuid) -> UseCaseResult<UserModel> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or(UseCaseError::NotFound)?;

        Ok(UserModel::from(user))
    }

    pub async fn complete_onboarding(&self, user_id: Uuid) -> UseCaseResult<UserModel> {
        let user = self
            .user_repository
            .complete_onboarding(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "authentication: failed to complete onboarding");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound)?;

        info!(%user_id, "authentication: onboarding completed");
        Ok(UserModel::from(user))
    }

    async fn open_free_subscription(&self, user_id: Uuid) -> UseCaseResult<()> {
        let free_package = self
            .package_repository
            .find_by_code(FREE_PACKAGE_CODE)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or_else(|| {
                UseCaseError::Internal(anyhow::anyhow!("free package is missing from the catalog"))
            })?;

        let now = Utc::now();
        self.subscription_repository
            .replace_active(
                InsertSubscriptionEntity {
                    user_id,
                    package_id: free_package.id,
                    status: SubscriptionStatus::Active.to_string(),
                    started_at: now,
                    ended_at: None,
                    canceled_at: None,
                    created_at: now,
                },
                None,
            )
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "authentication: failed to open free subscription");
                UseCaseError::Internal(err)
            })?;

        Ok(())
    }
}

pub fn hash_password(password: &str) -> Result<String, UseCaseError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UseCaseError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{packages::PackageEntity, users::UserEntity},
        repositories::{
            packages::MockPackageRepository, subscriptions::MockSubscriptionRepository,
            users::MockUserRepository,
        },
        value_objects::{enums::user_statuses::UserStatus, packages::PackageLimits},
    };
    use std::env;

    fn set_env_vars() {
        unsafe {
            env::set_var("JWT_AUTH_SECRET", "supersecretjwtsecretforunittesting123");
            env::set_var("AUTH_TOKEN_TTL_SECONDS", "3600");
        }
    }

    fn sample_user(email: &str, password: &str) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            display_name: Some("Test Seeker".to_string()),
            status: UserStatus::Active.to_string(),
            onboarding_completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn free_package() -> PackageEntity {
        PackageEntity {
            id: Uuid::new_v4(),
            code: FREE_PACKAGE_CODE.to_string(),
            name: "Free".to_string(),
            price_minor: 0,
            limits: PackageLimits {
                resumes_created: Some(1),
                revisions_used: Some(3),
                jobs_viewed: Some(10),
            },
            is_active: true,
        }
    }

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret1secret1").unwrap();
        assert!(verify_password("secret1secret1", &hash));
        assert!(!verify_password("not-the-password", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let usecase = AuthenticationUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPackageRepository::new()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let result = usecase
            .register(RegisterUserModel {
                email: "a@x.com".to_string(),
                password: "short".to_string(),
                display_name: None,
            })
            .await;

        assert!(matches!(result, Err(UseCaseError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut user_repo = MockUserRepository::new();
        let existing = sample_user("a@x.com", "secret1secret1");
        user_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let usecase = AuthenticationUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockPackageRepository::new()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let result = usecase
            .register(RegisterUserModel {
                email: "a@x.com".to_string(),
                password: "secret1secret1".to_string(),
                display_name: None,
            })
            .await;

        assert!(matches!(result, Err(UseCaseError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn register_opens_free_subscription() {
        let mut user_repo = MockUserRepository::new();
        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        user_repo.expect_find_by_email().returning(|_| Ok(None));

        let created = sample_user("a@x.com", "secret1secret1");
        let created_id = created.id;
        user_repo
            .expect_register()
            .returning(move |_| Ok(created.clone()));

        let package = free_package();
        package_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(package.clone())));

        subscription_repo
            .expect_replace_active()
            .withf(move |entity, payment| {
                entity.user_id == created_id && payment.is_none()
            })
            .returning(|_, _| Ok(Uuid::new_v4()));

        let usecase = AuthenticationUseCase::new(
            Arc::new(user_repo),
            Arc::new(package_repo),
            Arc::new(subscription_repo),
        );

        let user = usecase
            .register(RegisterUserModel {
                email: "a@x.com".to_string(),
                password: "secret1secret1".to_string(),
                display_name: None,
            })
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_invalid_credential() {
        let mut user_repo = MockUserRepository::new();
        let existing = sample_user("a@x.com", "secret1secret1");
        user_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let usecase = AuthenticationUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockPackageRepository::new()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let result = usecase
            .login(LoginModel {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UseCaseError::InvalidCredential)));
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_invalid_credential() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));

        let usecase = AuthenticationUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockPackageRepository::new()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let result = usecase
            .login(LoginModel {
                email: "nobody@x.com".to_string(),
                password: "secret1secret1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UseCaseError::InvalidCredential)));
    }

    #[tokio::test]
    async fn login_issues_bearer_token() {
        set_env_vars();

        let mut user_repo = MockUserRepository::new();
        let existing = sample_user("a@x.com", "secret1secret1");
        let user_id = existing.id;
        user_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let usecase = AuthenticationUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockPackageRepository::new()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let token = usecase
            .login(LoginModel {
                email: "a@x.com".to_string(),
                password: "secret1secret1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.user.id, user_id);

        let claims = crate::auth::validate_access_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }
}
