use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    repositories::{
        packages::PackageRepository, resumes::ResumeRepository,
        subscriptions::SubscriptionRepository, usage_stats::UsageStatsRepository,
    },
    value_objects::{
        enums::usage_resources::UsageResource,
        resumes::{
            CreateRevisionModel, EditResumeModel, InsertResumeModel, ResumeModel,
            ResumeRevisionModel,
        },
        usage_stats::period_month,
    },
};

use super::{
    entitlements::EntitlementResolver,
    errors::{UseCaseError, UseCaseResult},
};

pub struct ResumeUseCase<R, P, S, U>
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    resume_repository: Arc<R>,
    usage_stats_repository: Arc<U>,
    entitlement_resolver: Arc<EntitlementResolver<P, S, U>>,
}

impl<R, P, S, U> ResumeUseCase<R, P, S, U>
where
    R: ResumeRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageStatsRepository + Send + Sync + 'static,
{
    pub fn new(
        resume_repository: Arc<R>,
        usage_stats_repository: Arc<U>,
        entitlement_resolver: Arc<EntitlementResolver<P, S, U>>,
    ) -> Self {
        Self {
            resume_repository,
            usage_stats_repository,
            entitlement_resolver,
        }
    }

    pub async fn list(&self, user_id: Uuid) -> UseCaseResult<Vec<ResumeModel>> {
        let resumes = self
            .resume_repository
            .list(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "resumes: failed to list resumes");
                UseCaseError::Internal(err)
            })?;

        Ok(resumes.into_iter().map(ResumeModel::from).collect())
    }

    pub async fn get(&self, user_id: Uuid, resume_id: Uuid) -> UseCaseResult<ResumeModel> {
        let resume = self
            .resume_repository
            .find(user_id, resume_id)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or(UseCaseError::NotFound)?;

        Ok(ResumeModel::from(resume))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        insert_resume_model: InsertResumeModel,
    ) -> UseCaseResult<ResumeModel> {
        info!(%user_id, "resumes: create requested");

        if insert_resume_model.title.trim().is_empty() {
            return Err(UseCaseError::InvalidInput("title".to_string()));
        }

        self.consume_quota(user_id, UsageResource::ResumesCreated)
            .await?;

        let created = self
            .resume_repository
            .create(insert_resume_model.to_entity(user_id))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "resumes: failed to create resume");
                UseCaseError::Internal(err)
            })?;

        info!(%user_id, resume_id = %created.id, "resumes: resume created");
        Ok(ResumeModel::from(created))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        edit_resume_model: EditResumeModel,
    ) -> UseCaseResult<ResumeModel> {
        if edit_resume_model.is_empty() {
            return Err(UseCaseError::InvalidInput(
                "at least one field must be provided".to_string(),
            ));
        }

        let updated = self
            .resume_repository
            .update(user_id, resume_id, edit_resume_model.to_entity())
            .await
            .map_err(|err| {
                error!(%user_id, %resume_id, db_error = ?err, "resumes: failed to update resume");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound)?;

        info!(%user_id, %resume_id, "resumes: resume updated");
        Ok(ResumeModel::from(updated))
    }

    pub async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> UseCaseResult<()> {
        let deleted = self
            .resume_repository
            .delete(user_id, resume_id)
            .await
            .map_err(|err| {
                error!(%user_id, %resume_id, db_error = ?err, "resumes: failed to delete resume");
                UseCaseError::Internal(err)
            })?;

        if !deleted {
            return Err(UseCaseError::NotFound);
        }

        info!(%user_id, %resume_id, "resumes: resume deleted");
        Ok(())
    }

    pub async fn create_revision(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        create_revision_model: CreateRevisionModel,
    ) -> UseCaseResult<ResumeRevisionModel> {
        self.resume_repository
            .find(user_id, resume_id)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or(UseCaseError::NotFound)?;

        self.consume_quota(user_id, UsageResource::RevisionsUsed)
            .await?;

        let revision = self
            .resume_repository
            .create_revision(user_id, resume_id, create_revision_model.changes)
            .await
            .map_err(|err| {
                error!(%user_id, %resume_id, db_error = ?err, "resumes: failed to create revision");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound)?;

        info!(
            %user_id,
            %resume_id,
            revision_number = revision.revision_number,
            "resumes: revision created"
        );
        Ok(ResumeRevisionModel::from(revision))
    }

    pub async fn list_revisions(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> UseCaseResult<Vec<ResumeRevisionModel>> {
        let revisions = self
            .resume_repository
            .list_revisions(user_id, resume_id)
            .await
            .map_err(UseCaseError::Internal)?
            .ok_or(UseCaseError::NotFound)?;

        Ok(revisions.into_iter().map(ResumeRevisionModel::from).collect())
    }

    /// Entitlement check followed by an atomic counter reservation. The
    /// guarded increment is what actually enforces the limit; the pure
    /// check in front keeps denials from ever touching the counter row's
    /// lock path.
    async fn consume_quota(&self, user_id: Uuid, resource: UsageResource) -> UseCaseResult<()> {
        let decision = self
            .entitlement_resolver
            .check(user_id, resource)
            .await
            .map_err(UseCaseError::Internal)?;

        if !decision.allowed {
            warn!(
                %user_id,
                resource = %resource,
                limit = decision.limit,
                current = decision.current,
                status = UseCaseError::limit_reached(&decision).status_code().as_u16(),
                "resumes: limit reached"
            );
            return Err(UseCaseError::limit_reached(&decision));
        }

        let period = period_month(Utc::now());
        let consumed = self
            .usage_stats_repository
            .try_consume(user_id, &period, resource, decision.limit)
            .await
            .map_err(|err| {
                error!(%user_id, resource = %resource, db_error = ?err, "resumes: failed to consume quota");
                UseCaseError::Internal(err)
            })?;

        if !consumed {
            // Lost the race to a concurrent request; re-read for an accurate payload.
            let current = self
                .usage_stats_repository
                .find(user_id, &period)
                .await
                .map_err(UseCaseError::Internal)?
                .map(|stats| stats.counter(resource))
                .unwrap_or(decision.limit);

            warn!(
                %user_id,
                resource = %resource,
                limit = decision.limit,
                current,
                "resumes: quota exhausted by concurrent request"
            );
            return Err(UseCaseError::LimitReached {
                resource,
                limit: decision.limit,
                current,
            });
        }

        Ok(())
    }
}
