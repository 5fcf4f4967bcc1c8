use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::InsertSubscriptionEntity,
    repositories::{packages::PackageRepository, subscriptions::SubscriptionRepository},
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        packages::{FREE_PACKAGE_CODE, PackageModel},
        subscriptions::{
            CurrentSubscriptionModel, PaymentTransactionModel, SubscriptionModel,
            UpgradeSubscriptionModel,
        },
    },
};

use super::errors::{UseCaseError, UseCaseResult};

pub struct SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    subscription_repository: Arc<S>,
    package_repository: Arc<P>,
}

impl<S, P> SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repository: Arc<S>, package_repository: Arc<P>) -> Self {
        Self {
            subscription_repository,
            package_repository,
        }
    }

    pub async fn list_packages(&self) -> UseCaseResult<Vec<PackageModel>> {
        let packages = self
            .package_repository
            .list_active()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: failed to list packages");
                UseCaseError::Internal(err)
            })?;

        info!(package_count = packages.len(), "subscriptions: active packages loaded");
        Ok(packages.into_iter().map(PackageModel::from).collect())
    }

    pub async fn current(&self, user_id: Uuid) -> UseCaseResult<Option<CurrentSubscriptionModel>> {
        let subscription = match self
            .subscription_repository
            .find_active(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "subscriptions: failed to load current subscription");
                UseCaseError::Internal(err)
            })? {
            Some(subscription) => subscription,
            None => {
                info!(%user_id, "subscriptions: no active subscription");
                return Ok(None);
            }
        };

        let package = self
            .package_repository
            .find_by_id(subscription.package_id)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or_else(|| {
                UseCaseError::Internal(anyhow::anyhow!(
                    "subscription references unknown package {}",
                    subscription.package_id
                ))
            })?;

        Ok(Some(CurrentSubscriptionModel {
            package: PackageModel::from(package),
            status: SubscriptionStatus::from_str(&subscription.status),
            started_at: subscription.started_at,
            ended_at: subscription.ended_at,
        }))
    }

    pub async fn upgrade(
        &self,
        user_id: Uuid,
        upgrade_subscription_model: UpgradeSubscriptionModel,
    ) -> UseCaseResult<CurrentSubscriptionModel> {
        let package_id = upgrade_subscription_model.package_id;
        info!(%user_id, %package_id, "subscriptions: upgrade requested");

        let package = self
            .package_repository
            .find_by_id(package_id)
            .await
            .map_err(UseCaseError::Internal)?
            .filter(|package| package.is_active)
            .ok_or_else(|| {
                warn!(
                    %user_id,
                    %package_id,
                    status = UseCaseError::NotFound.status_code().as_u16(),
                    "subscriptions: target package not found or inactive"
                );
                UseCaseError::NotFound
            })?;

        if let Some(active) = self
            .subscription_repository
            .find_active(user_id)
            .await
            .map_err(UseCaseError::Internal)?
        {
            if active.package_id == package.id {
                return Err(UseCaseError::InvalidInput(
                    "package is already active".to_string(),
                ));
            }
        }

        let now = Utc::now();
        let payment_amount = (package.price_minor > 0).then_some(package.price_minor);
        self.subscription_repository
            .replace_active(
                InsertSubscriptionEntity {
                    user_id,
                    package_id: package.id,
                    status: SubscriptionStatus::Active.to_string(),
                    started_at: now,
                    ended_at: None,
                    canceled_at: None,
                    created_at: now,
                },
                payment_amount,
            )
            .await
            .map_err(|err| {
                error!(%user_id, %package_id, db_error = ?err, "subscriptions: upgrade failed");
                UseCaseError::Internal(err)
            })?;

        info!(
            %user_id,
            %package_id,
            amount_minor = package.price_minor,
            "subscriptions: upgrade completed"
        );

        self.current(user_id).await?.ok_or_else(|| {
            UseCaseError::Internal(anyhow::anyhow!("upgrade did not leave an active subscription"))
        })
    }

    pub async fn cancel(&self, user_id: Uuid) -> UseCaseResult<()> {
        let active = self
            .subscription_repository
            .find_active(user_id)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or_else(|| {
                warn!(
                    %user_id,
                    status = UseCaseError::NotFound.status_code().as_u16(),
                    "subscriptions: no active subscription to cancel"
                );
                UseCaseError::NotFound
            })?;

        let free_package = self
            .package_repository
            .find_by_code(FREE_PACKAGE_CODE)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or_else(|| {
                UseCaseError::Internal(anyhow::anyhow!("free package is missing from the catalog"))
            })?;

        if active.package_id == free_package.id {
            return Err(UseCaseError::InvalidInput(
                "free tier cannot be canceled".to_string(),
            ));
        }

        // Downgrade rather than delete, so the subject always holds exactly
        // one active subscription.
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
                error!(%user_id, db_error = ?err, "subscriptions: cancel failed");
                UseCaseError::Internal(err)
            })?;

        info!(%user_id, "subscriptions: subscription canceled, back on free tier");
        Ok(())
    }

    pub async fn history(&self, user_id: Uuid) -> UseCaseResult<Vec<SubscriptionModel>> {
        let subscriptions = self
            .subscription_repository
            .list_history(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "subscriptions: failed to load history");
                UseCaseError::Internal(err)
            })?;

        Ok(subscriptions
            .into_iter()
            .map(SubscriptionModel::from)
            .collect())
    }

    pub async fn payments(&self, user_id: Uuid) -> UseCaseResult<Vec<PaymentTransactionModel>> {
        let transactions = self
            .subscription_repository
            .list_payment_transactions(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "subscriptions: failed to load payments");
                UseCaseError::Internal(err)
            })?;

        Ok(transactions
            .into_iter()
            .map(PaymentTransactionModel::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{packages::PackageEntity, subscriptions::SubscriptionEntity},
        repositories::{
            packages::MockPackageRepository, subscriptions::MockSubscriptionRepository,
        },
        value_objects::packages::PackageLimits,
    };
    use mockall::Sequence;

    fn package(id: Uuid, code: &str, price_minor: i32) -> PackageEntity {
        PackageEntity {
            id,
            code: code.to_string(),
            name: format!("{} package", code),
            price_minor,
            limits: PackageLimits::default(),
            is_active: true,
        }
    }

    fn active_subscription(user_id: Uuid, package_id: Uuid) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id,
            package_id,
            status: SubscriptionStatus::Active.to_string(),
            started_at: now,
            ended_at: None,
            canceled_at: None,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn upgrade_records_payment_for_paid_package() {
        let user_id = Uuid::new_v4();
        let premium_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let premium = package(premium_id, "premium", 4900);
        package_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(premium.clone())));

        let mut seq = Sequence::new();
        subscription_repo
            .expect_find_active()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        subscription_repo
            .expect_replace_active()
            .times(1)
            .in_sequence(&mut seq)
            .withf(move |entity, payment| {
                entity.user_id == user_id
                    && entity.package_id == premium_id
                    && *payment == Some(4900)
            })
            .returning(|_, _| Ok(Uuid::new_v4()));
        let new_subscription = active_subscription(user_id, premium_id);
        subscription_repo
            .expect_find_active()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(new_subscription.clone())));

        let usecase =
            SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(package_repo));

        let current = usecase
            .upgrade(
                user_id,
                UpgradeSubscriptionModel {
                    package_id: premium_id,
                },
            )
            .await
            .unwrap();

        assert_eq!(current.package.id, premium_id);
        assert_eq!(current.status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn upgrade_to_already_active_package_is_rejected() {
        let user_id = Uuid::new_v4();
        let premium_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let premium = package(premium_id, "premium", 4900);
        package_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(premium.clone())));

        let existing = active_subscription(user_id, premium_id);
        subscription_repo
            .expect_find_active()
            .returning(move |_| Ok(Some(existing.clone())));

        let usecase =
            SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(package_repo));

        let result = usecase
            .upgrade(
                user_id,
                UpgradeSubscriptionModel {
                    package_id: premium_id,
                },
            )
            .await;

        assert!(matches!(result, Err(UseCaseError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn upgrade_to_unknown_package_is_not_found() {
        let mut package_repo = MockPackageRepository::new();
        package_repo.expect_find_by_id().returning(|_| Ok(None));

        let usecase = SubscriptionUseCase::new(
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(package_repo),
        );

        let result = usecase
            .upgrade(
                Uuid::new_v4(),
                UpgradeSubscriptionModel {
                    package_id: Uuid::new_v4(),
                },
            )
            .await;

        assert!(matches!(result, Err(UseCaseError::NotFound)));
    }

    #[tokio::test]
    async fn cancel_replaces_paid_subscription_with_free_tier() {
        let user_id = Uuid::new_v4();
        let premium_id = Uuid::new_v4();
        let free_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let existing = active_subscription(user_id, premium_id);
        subscription_repo
            .expect_find_active()
            .returning(move |_| Ok(Some(existing.clone())));

        let free = package(free_id, FREE_PACKAGE_CODE, 0);
        package_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(free.clone())));

        subscription_repo
            .expect_replace_active()
            .withf(move |entity, payment| entity.package_id == free_id && payment.is_none())
            .times(1)
            .returning(|_, _| Ok(Uuid::new_v4()));

        let usecase =
            SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(package_repo));

        usecase.cancel(user_id).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_without_active_subscription_is_not_found() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_active().returning(|_| Ok(None));

        let usecase = SubscriptionUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(MockPackageRepository::new()),
        );

        let result = usecase.cancel(Uuid::new_v4()).await;
        assert!(matches!(result, Err(UseCaseError::NotFound)));
    }
}
