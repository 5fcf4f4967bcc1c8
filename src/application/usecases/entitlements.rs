use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{
    entities::packages::PackageEntity,
    repositories::{
        packages::PackageRepository, subscriptions::SubscriptionRepository,
        usage_stats::UsageStatsRepository,
    },
    value_objects::{
        entitlements::EntitlementDecision, enums::usage_resources::UsageResource,
        packages::FREE_PACKAGE_CODE, usage_stats::period_month,
    },
};

/// Resolves the effective package for a subject and decides whether a
/// counted action is still within its limit. A subject without an active
/// subscription row is held to the free package's limits; no call site
/// skips the check.
pub struct EntitlementResolver<P, S, U>
where
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    package_repository: Arc<P>,
    subscription_repository: Arc<S>,
    usage_stats_repository: Arc<U>,
}

impl<P, S, U> EntitlementResolver<P, S, U>
where
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    pub fn new(
        package_repository: Arc<P>,
        subscription_repository: Arc<S>,
        usage_stats_repository: Arc<U>,
    ) -> Self {
        Self {
            package_repository,
            subscription_repository,
            usage_stats_repository,
        }
    }

    pub async fn resolve_effective_package(&self, user_id: Uuid) -> Result<PackageEntity> {
        match self.subscription_repository.find_active(user_id).await? {
            Some(subscription) => {
                if let Some(package) = self
                    .package_repository
                    .find_by_id(subscription.package_id)
                    .await?
                {
                    debug!(
                        %user_id,
                        package_id = %package.id,
                        "entitlements: using active subscription package"
                    );
                    return Ok(package);
                }

                warn!(
                    %user_id,
                    package_id = %subscription.package_id,
                    "entitlements: active subscription references unknown package, using free tier"
                );
            }
            None => {
                debug!(%user_id, "entitlements: no active subscription, using free tier");
            }
        }

        self.package_repository
            .find_by_code(FREE_PACKAGE_CODE)
            .await?
            .context("free package is missing from the catalog")
    }

    /// Pure allow/deny decision for one resource. No side effects.
    pub async fn check(
        &self,
        user_id: Uuid,
        resource: UsageResource,
    ) -> Result<EntitlementDecision> {
        let package = self.resolve_effective_package(user_id).await?;
        let limit = package.limits.limit_for(resource);
        let current = self.current_usage(user_id, resource).await?;

        let decision = EntitlementDecision::decide(resource, limit, current);
        if !decision.allowed {
            debug!(
                %user_id,
                resource = %resource,
                limit,
                current,
                "entitlements: limit reached"
            );
        }

        Ok(decision)
    }

    /// One decision per countable resource, sharing a single package and
    /// usage lookup.
    pub async fn usage_overview(&self, user_id: Uuid) -> Result<Vec<EntitlementDecision>> {
        let package = self.resolve_effective_package(user_id).await?;
        let period = period_month(Utc::now());
        let stats = self
            .usage_stats_repository
            .find(user_id, &period)
            .await?;

        Ok(UsageResource::all()
            .into_iter()
            .map(|resource| {
                let current = stats.as_ref().map(|s| s.counter(resource)).unwrap_or(0);
                EntitlementDecision::decide(resource, package.limits.limit_for(resource), current)
            })
            .collect())
    }

    async fn current_usage(&self, user_id: Uuid, resource: UsageResource) -> Result<i32> {
        let period = period_month(Utc::now());
        Ok(self
            .usage_stats_repository
            .find(user_id, &period)
            .await?
            .map(|stats| stats.counter(resource))
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{
            subscriptions::SubscriptionEntity,
            usage_stats::UsageStatsEntity,
        },
        repositories::{
            packages::MockPackageRepository, subscriptions::MockSubscriptionRepository,
            usage_stats::MockUsageStatsRepository,
        },
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus,
            packages::{PackageLimits, UNLIMITED},
        },
    };
    use mockall::predicate::eq;

    fn sample_package(id: Uuid, code: &str, limits: PackageLimits) -> PackageEntity {
        PackageEntity {
            id,
            code: code.to_string(),
            name: format!("{} package", code),
            price_minor: 0,
            limits,
            is_active: true,
        }
    }

    fn sample_subscription(user_id: Uuid, package_id: Uuid) -> SubscriptionEntity {
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

    fn sample_usage(user_id: Uuid, resumes_created: i32) -> UsageStatsEntity {
        UsageStatsEntity {
            user_id,
            period_month: period_month(Utc::now()),
            resumes_created,
            revisions_used: 0,
            jobs_viewed: 0,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn uses_subscribed_package_when_subscription_exists() {
        let user_id = Uuid::new_v4();
        let package_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let usage_repo = MockUsageStatsRepository::new();

        let subscription = sample_subscription(user_id, package_id);
        subscription_repo
            .expect_find_active()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(subscription.clone())));

        let package = sample_package(package_id, "premium", PackageLimits::default());
        package_repo
            .expect_find_by_id()
            .with(eq(package_id))
            .returning(move |_| Ok(Some(package.clone())));

        let resolver = EntitlementResolver::new(
            Arc::new(package_repo),
            Arc::new(subscription_repo),
            Arc::new(usage_repo),
        );

        let resolved = resolver.resolve_effective_package(user_id).await.unwrap();
        assert_eq!(resolved.id, package_id);
    }

    #[tokio::test]
    async fn falls_back_to_free_package_when_no_active_subscription() {
        let user_id = Uuid::new_v4();
        let free_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let usage_repo = MockUsageStatsRepository::new();

        subscription_repo
            .expect_find_active()
            .with(eq(user_id))
            .returning(|_| Ok(None));

        let free_package = sample_package(free_id, FREE_PACKAGE_CODE, PackageLimits::default());
        package_repo
            .expect_find_by_code()
            .withf(|code| code == FREE_PACKAGE_CODE)
            .returning(move |_| Ok(Some(free_package.clone())));

        let resolver = EntitlementResolver::new(
            Arc::new(package_repo),
            Arc::new(subscription_repo),
            Arc::new(usage_repo),
        );

        let resolved = resolver.resolve_effective_package(user_id).await.unwrap();
        assert_eq!(resolved.id, free_id);
        assert_eq!(resolved.code, FREE_PACKAGE_CODE);
    }

    #[tokio::test]
    async fn unlimited_never_denies() {
        let user_id = Uuid::new_v4();
        let package_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut usage_repo = MockUsageStatsRepository::new();

        let subscription = sample_subscription(user_id, package_id);
        subscription_repo
            .expect_find_active()
            .returning(move |_| Ok(Some(subscription.clone())));

        let limits = PackageLimits {
            resumes_created: Some(UNLIMITED),
            ..Default::default()
        };
        let package = sample_package(package_id, "premium", limits);
        package_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(package.clone())));

        let stats = sample_usage(user_id, 1_000_000);
        usage_repo
            .expect_find()
            .returning(move |_, _| Ok(Some(stats.clone())));

        let resolver = EntitlementResolver::new(
            Arc::new(package_repo),
            Arc::new(subscription_repo),
            Arc::new(usage_repo),
        );

        let decision = resolver
            .check(user_id, UsageResource::ResumesCreated)
            .await
            .unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.limit, UNLIMITED);
    }

    #[tokio::test]
    async fn denies_at_limit_with_matching_numbers() {
        let user_id = Uuid::new_v4();
        let free_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut usage_repo = MockUsageStatsRepository::new();

        subscription_repo.expect_find_active().returning(|_| Ok(None));

        let limits = PackageLimits {
            resumes_created: Some(1),
            ..Default::default()
        };
        let free_package = sample_package(free_id, FREE_PACKAGE_CODE, limits);
        package_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(free_package.clone())));

        let stats = sample_usage(user_id, 1);
        usage_repo
            .expect_find()
            .returning(move |_, _| Ok(Some(stats.clone())));

        let resolver = EntitlementResolver::new(
            Arc::new(package_repo),
            Arc::new(subscription_repo),
            Arc::new(usage_repo),
        );

        let decision = resolver
            .check(user_id, UsageResource::ResumesCreated)
            .await
            .unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.limit, 1);
        assert_eq!(decision.current, 1);
    }

    #[tokio::test]
    async fn missing_usage_row_counts_as_zero() {
        let user_id = Uuid::new_v4();
        let free_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut usage_repo = MockUsageStatsRepository::new();

        subscription_repo.expect_find_active().returning(|_| Ok(None));

        let limits = PackageLimits {
            revisions_used: Some(3),
            ..Default::default()
        };
        let free_package = sample_package(free_id, FREE_PACKAGE_CODE, limits);
        package_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(free_package.clone())));

        usage_repo.expect_find().returning(|_, _| Ok(None));

        let resolver = EntitlementResolver::new(
            Arc::new(package_repo),
            Arc::new(subscription_repo),
            Arc::new(usage_repo),
        );

        let decision = resolver
            .check(user_id, UsageResource::RevisionsUsed)
            .await
            .unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.current, 0);
    }
}
