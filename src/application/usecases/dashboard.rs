use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    repositories::{
        job_matches::JobMatchRepository, packages::PackageRepository, resumes::ResumeRepository,
        subscriptions::SubscriptionRepository, usage_stats::UsageStatsRepository,
        users::UserRepository,
    },
    value_objects::{dashboard::DashboardModel, iam::UserModel},
};

use super::{
    entitlements::EntitlementResolver,
    errors::{UseCaseError, UseCaseResult},
};

pub struct DashboardUseCase<Usr, R, J, P, S, U>
where
    Usr: UserRepository + Send + Sync + 'static,
    R: ResumeRepository + Send + Sync + 'static,
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    user_repository: Arc<Usr>,
    resume_repository: Arc<R>,
    job_match_repository: Arc<J>,
    entitlement_resolver: Arc<EntitlementResolver<P, S, U>>,
}

impl<Usr, R, J, P, S, U> DashboardUseCase<Usr, R, J, P, S, U>
where
    Usr: UserRepository + Send + Sync + 'static,
    R: ResumeRepository + Send + Sync + 'static,
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<Usr>,
        resume_repository: Arc<R>,
        job_match_repository: Arc<J>,
        entitlement_resolver: Arc<EntitlementResolver<P, S, U>>,
    ) -> Self {
        Self {
            user_repository,
            resume_repository,
            job_match_repository,
            entitlement_resolver,
        }
    }

    pub async fn overview(&self, user_id: Uuid) -> UseCaseResult<DashboardModel> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or(UseCaseError::NotFound)?;

        let package = self
            .entitlement_resolver
            .resolve_effective_package(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "dashboard: failed to resolve package");
                UseCaseError::Internal(err)
            })?;

        let usage = self
            .entitlement_resolver
            .usage_overview(user_id)
            .await
            .map_err(UseCaseError::Internal)?;

        let resume_count = self
            .resume_repository
            .count(user_id)
            .await
            .map_err(UseCaseError::Internal)?;

        let job_match_count = self
            .job_match_repository
            .count(user_id)
            .await
            .map_err(UseCaseError::Internal)?;

        Ok(DashboardModel {
            user: UserModel::from(user),
            package_code: package.code,
            package_name: package.name,
            usage,
            resume_count,
            job_match_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::{
        entities::{packages::PackageEntity, users::UserEntity},
        repositories::{
            job_matches::MockJobMatchRepository, packages::MockPackageRepository,
            resumes::MockResumeRepository, subscriptions::MockSubscriptionRepository,
            usage_stats::MockUsageStatsRepository, users::MockUserRepository,
        },
        value_objects::{
            enums::user_statuses::UserStatus,
            packages::{FREE_PACKAGE_CODE, PackageLimits},
        },
    };

    #[tokio::test]
    async fn overview_assembles_counts_and_usage() {
        let user_id = Uuid::new_v4();

        let mut user_repo = MockUserRepository::new();
        let mut resume_repo = MockResumeRepository::new();
        let mut job_match_repo = MockJobMatchRepository::new();
        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut usage_repo = MockUsageStatsRepository::new();

        let now = Utc::now();
        let user = UserEntity {
            id: user_id,
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            display_name: None,
            status: UserStatus::Active.to_string(),
            onboarding_completed_at: None,
            created_at: now,
            updated_at: now,
        };
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        subscription_repo.expect_find_active().returning(|_| Ok(None));

        let free = PackageEntity {
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
        };
        package_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(free.clone())));

        usage_repo.expect_find().returning(|_, _| Ok(None));
        resume_repo.expect_count().returning(|_| Ok(1));
        job_match_repo.expect_count().returning(|_| Ok(4));

        let usage_repo = Arc::new(usage_repo);
        let resolver = Arc::new(EntitlementResolver::new(
            Arc::new(package_repo),
            Arc::new(subscription_repo),
            usage_repo,
        ));
        let usecase = DashboardUseCase::new(
            Arc::new(user_repo),
            Arc::new(resume_repo),
            Arc::new(job_match_repo),
            resolver,
        );

        let dashboard = usecase.overview(user_id).await.unwrap();

        assert_eq!(dashboard.package_code, FREE_PACKAGE_CODE);
        assert_eq!(dashboard.resume_count, 1);
        assert_eq!(dashboard.job_match_count, 4);
        assert_eq!(dashboard.usage.len(), 3);
    }
}
