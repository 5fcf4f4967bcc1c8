use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    repositories::{
        job_matches::JobMatchRepository, packages::PackageRepository,
        subscriptions::SubscriptionRepository, usage_stats::UsageStatsRepository,
    },
    value_objects::{
        enums::usage_resources::UsageResource,
        job_matches::{InsertJobMatchModel, JobMatchFilter, JobMatchModel},
        usage_stats::period_month,
    },
};

use super::{
    entitlements::EntitlementResolver,
    errors::{UseCaseError, UseCaseResult},
};

pub struct JobMatchUseCase<J, P, S, U>
where
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    job_match_repository: Arc<J>,
    usage_stats_repository: Arc<U>,
    entitlement_resolver: Arc<EntitlementResolver<P, S, U>>,
}

impl<J, P, S, U> JobMatchUseCase<J, P, S, U>
where
    J: JobMatchRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    pub fn new(
        job_match_repository: Arc<J>,
        usage_stats_repository: Arc<U>,
        entitlement_resolver: Arc<EntitlementResolver<P, S, U>>,
    ) -> Self {
        Self {
            job_match_repository,
            usage_stats_repository,
            entitlement_resolver,
        }
    }

    /// Listing job matches is the counted "view" action.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: JobMatchFilter,
    ) -> UseCaseResult<Vec<JobMatchModel>> {
        let decision = self
            .entitlement_resolver
            .check(user_id, UsageResource::JobsViewed)
            .await
            .map_err(UseCaseError::Internal)?;

        if !decision.allowed {
            warn!(
                %user_id,
                limit = decision.limit,
                current = decision.current,
                status = UseCaseError::limit_reached(&decision).status_code().as_u16(),
                "job_matches: view limit reached"
            );
            return Err(UseCaseError::limit_reached(&decision));
        }

        let period = period_month(Utc::now());
        let consumed = self
            .usage_stats_repository
            .try_consume(user_id, &period, UsageResource::JobsViewed, decision.limit)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "job_matches: failed to consume view quota");
                UseCaseError::Internal(err)
            })?;

        if !consumed {
            let current = self
                .usage_stats_repository
                .find(user_id, &period)
                .await
                .map_err(UseCaseError::Internal)?
                .map(|stats| stats.counter(UsageResource::JobsViewed))
                .unwrap_or(decision.limit);

            return Err(UseCaseError::LimitReached {
                resource: UsageResource::JobsViewed,
                limit: decision.limit,
                current,
            });
        }

        let matches = self
            .job_match_repository
            .list(user_id, &filter)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "job_matches: failed to list matches");
                UseCaseError::Internal(err)
            })?;

        Ok(matches.into_iter().map(JobMatchModel::from).collect())
    }

    pub async fn ingest(
        &self,
        user_id: Uuid,
        insert_job_match_models: Vec<InsertJobMatchModel>,
    ) -> UseCaseResult<usize> {
        if insert_job_match_models.is_empty() {
            return Err(UseCaseError::InvalidInput(
                "job_matches must not be empty".to_string(),
            ));
        }
        if insert_job_match_models
            .iter()
            .any(|model| model.location.trim().is_empty())
        {
            return Err(UseCaseError::InvalidInput("location".to_string()));
        }

        let entities = insert_job_match_models
            .iter()
            .map(|model| model.to_entity(user_id))
            .collect();

        let inserted = self
            .job_match_repository
            .insert_many(entities)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "job_matches: failed to ingest matches");
                UseCaseError::Internal(err)
            })?;

        info!(%user_id, inserted, "job_matches: batch ingested");
        Ok(inserted)
    }

    pub async fn mark_applied(
        &self,
        user_id: Uuid,
        job_match_id: Uuid,
    ) -> UseCaseResult<JobMatchModel> {
        let updated = self
            .job_match_repository
            .mark_applied(user_id, job_match_id)
            .await
            .map_err(|err| {
                error!(%user_id, %job_match_id, db_error = ?err, "job_matches: failed to mark applied");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound)?;

        info!(%user_id, %job_match_id, "job_matches: marked applied");
        Ok(JobMatchModel::from(updated))
    }

    pub async fn mark_saved(
        &self,
        user_id: Uuid,
        job_match_id: Uuid,
    ) -> UseCaseResult<JobMatchModel> {
        let updated = self
            .job_match_repository
            .mark_saved(user_id, job_match_id)
            .await
            .map_err(|err| {
                error!(%user_id, %job_match_id, db_error = ?err, "job_matches: failed to mark saved");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound)?;

        info!(%user_id, %job_match_id, "job_matches: marked saved");
        Ok(JobMatchModel::from(updated))
    }

    /// Populates a fresh account with sample matches. Exposed only outside
    /// production.
    pub async fn seed_demo(&self, user_id: Uuid) -> UseCaseResult<usize> {
        let samples = demo_job_matches();
        let inserted = self.ingest(user_id, samples).await?;

        info!(%user_id, inserted, "job_matches: demo data seeded");
        Ok(inserted)
    }
}

fn demo_job_matches() -> Vec<InsertJobMatchModel> {
    vec![
        InsertJobMatchModel {
            job_details: json!({
                "title": "Senior Backend Engineer",
                "company": "Orbit Labs",
                "employment_type": "full-time",
            }),
            match_score: 92,
            location: "Dhaka".to_string(),
        },
        InsertJobMatchModel {
            job_details: json!({
                "title": "Platform Engineer",
                "company": "Northwind Cloud",
                "employment_type": "full-time",
            }),
            match_score: 87,
            location: "Dhaka".to_string(),
        },
        InsertJobMatchModel {
            job_details: json!({
                "title": "Data Engineer",
                "company": "Brightline Analytics",
                "employment_type": "contract",
            }),
            match_score: 74,
            location: "Chattogram".to_string(),
        },
        InsertJobMatchModel {
            job_details: json!({
                "title": "Frontend Engineer",
                "company": "Meadow Systems",
                "employment_type": "remote",
            }),
            match_score: 69,
            location: "Remote".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{
            job_matches::JobMatchEntity, packages::PackageEntity, usage_stats::UsageStatsEntity,
        },
        repositories::{
            job_matches::MockJobMatchRepository, packages::MockPackageRepository,
            subscriptions::MockSubscriptionRepository, usage_stats::MockUsageStatsRepository,
        },
        value_objects::packages::{FREE_PACKAGE_CODE, PackageLimits, UNLIMITED},
    };

    fn free_package_with_view_limit(limit: i32) -> PackageEntity {
        PackageEntity {
            id: Uuid::new_v4(),
            code: FREE_PACKAGE_CODE.to_string(),
            name: "Free".to_string(),
            price_minor: 0,
            limits: PackageLimits {
                resumes_created: Some(1),
                revisions_used: Some(3),
                jobs_viewed: Some(limit),
            },
            is_active: true,
        }
    }

    fn usage_with_views(user_id: Uuid, jobs_viewed: i32) -> UsageStatsEntity {
        UsageStatsEntity {
            user_id,
            period_month: period_month(Utc::now()),
            resumes_created: 0,
            revisions_used: 0,
            jobs_viewed,
            updated_at: Utc::now(),
        }
    }

    fn sample_match(user_id: Uuid, location: &str, match_score: i32) -> JobMatchEntity {
        JobMatchEntity {
            id: Uuid::new_v4(),
            user_id,
            job_details: json!({"title": "Engineer"}),
            match_score,
            location: location.to_string(),
            applied_at: None,
            saved_at: None,
            created_at: Utc::now(),
        }
    }

    fn usecase_with(
        job_match_repo: MockJobMatchRepository,
        package_repo: MockPackageRepository,
        subscription_repo: MockSubscriptionRepository,
        usage_repo: MockUsageStatsRepository,
    ) -> JobMatchUseCase<
        MockJobMatchRepository,
        MockPackageRepository,
        MockSubscriptionRepository,
        MockUsageStatsRepository,
    > {
        let usage_repo = Arc::new(usage_repo);
        let resolver = Arc::new(EntitlementResolver::new(
            Arc::new(package_repo),
            Arc::new(subscription_repo),
            Arc::clone(&usage_repo),
        ));
        JobMatchUseCase::new(Arc::new(job_match_repo), usage_repo, resolver)
    }

    #[tokio::test]
    async fn list_with_unlimited_tier_passes_filter_through() {
        let user_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut usage_repo = MockUsageStatsRepository::new();
        let mut job_match_repo = MockJobMatchRepository::new();

        subscription_repo.expect_find_active().returning(|_| Ok(None));

        let package = free_package_with_view_limit(UNLIMITED);
        package_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(package.clone())));

        let stats = usage_with_views(user_id, 5_000);
        usage_repo
            .expect_find()
            .returning(move |_, _| Ok(Some(stats.clone())));
        usage_repo
            .expect_try_consume()
            .withf(|_, _, resource, limit| {
                *resource == UsageResource::JobsViewed && *limit == UNLIMITED
            })
            .returning(|_, _, _, _| Ok(true));

        let rows = vec![
            sample_match(user_id, "Dhaka", 92),
            sample_match(user_id, "Dhaka", 87),
        ];
        job_match_repo
            .expect_list()
            .withf(|_, filter| filter.location.as_deref() == Some("Dhaka"))
            .returning(move |_, _| Ok(rows.clone()));

        let usecase = usecase_with(job_match_repo, package_repo, subscription_repo, usage_repo);

        let matches = usecase
            .list(
                user_id,
                JobMatchFilter {
                    location: Some("Dhaka".to_string()),
                    min_score: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.location == "Dhaka"));
    }

    #[tokio::test]
    async fn list_at_view_limit_is_denied() {
        let user_id = Uuid::new_v4();

        let mut package_repo = MockPackageRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut usage_repo = MockUsageStatsRepository::new();

        subscription_repo.expect_find_active().returning(|_| Ok(None));

        let package = free_package_with_view_limit(10);
        package_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(package.clone())));

        let stats = usage_with_views(user_id, 10);
        usage_repo
            .expect_find()
            .returning(move |_, _| Ok(Some(stats.clone())));

        let usecase = usecase_with(
            MockJobMatchRepository::new(),
            package_repo,
            subscription_repo,
            usage_repo,
        );

        let result = usecase.list(user_id, JobMatchFilter::default()).await;

        match result {
            Err(UseCaseError::LimitReached { limit, current, .. }) => {
                assert_eq!(limit, 10);
                assert_eq!(current, 10);
            }
            other => panic!("expected LimitReached, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn ingest_rejects_empty_batch() {
        let usecase = usecase_with(
            MockJobMatchRepository::new(),
            MockPackageRepository::new(),
            MockSubscriptionRepository::new(),
            MockUsageStatsRepository::new(),
        );

        let result = usecase.ingest(Uuid::new_v4(), vec![]).await;
        assert!(matches!(result, Err(UseCaseError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn mark_applied_on_foreign_match_is_not_found() {
        let mut job_match_repo = MockJobMatchRepository::new();
        job_match_repo
            .expect_mark_applied()
            .returning(|_, _| Ok(None));

        let usecase = usecase_with(
            job_match_repo,
            MockPackageRepository::new(),
            MockSubscriptionRepository::new(),
            MockUsageStatsRepository::new(),
        );

        let result = usecase.mark_applied(Uuid::new_v4(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(UseCaseError::NotFound)));
    }
}
