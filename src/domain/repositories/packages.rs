use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::packages::PackageEntity;

#[automock]
#[async_trait]
pub trait PackageRepository {
    async fn find_by_id(&self, package_id: Uuid) -> Result<Option<PackageEntity>>;
    async fn find_by_code(&self, code: &str) -> Result<Option<PackageEntity>>;
    async fn list_active(&self) -> Result<Vec<PackageEntity>>;
}
