use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::users::{RegisterUserEntity, UserEntity};

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn register(&self, register_user_entity: RegisterUserEntity) -> Result<UserEntity>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
    async fn complete_onboarding(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
}
