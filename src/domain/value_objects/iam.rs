use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::users::{RegisterUserEntity, UserEntity},
    value_objects::enums::user_statuses::UserStatus,
};

/// Client-facing user projection. The credential hash never leaves the
/// domain layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub status: UserStatus,
    pub onboarding_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for UserModel {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            email: value.email,
            display_name: value.display_name,
            status: UserStatus::from_str(&value.status),
            onboarding_completed_at: value.onboarding_completed_at,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserModel {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl RegisterUserModel {
    pub fn to_entity(&self, password_hash: String) -> RegisterUserEntity {
        let now = Utc::now();
        RegisterUserEntity {
            email: self.email.clone(),
            password_hash,
            display_name: self.display_name.clone(),
            status: UserStatus::Active.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenModel {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserModel,
}
