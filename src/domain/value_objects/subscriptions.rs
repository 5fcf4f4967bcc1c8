use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        payment_transactions::PaymentTransactionEntity, subscriptions::SubscriptionEntity,
    },
    value_objects::{
        enums::{payment_statuses::PaymentStatus, subscription_statuses::SubscriptionStatus},
        packages::PackageModel,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub package_id: Uuid,
    pub status: SubscriptionStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(value: SubscriptionEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            package_id: value.package_id,
            status: SubscriptionStatus::from_str(&value.status),
            started_at: value.started_at,
            ended_at: value.ended_at,
            canceled_at: value.canceled_at,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeSubscriptionModel {
    pub package_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentSubscriptionModel {
    pub package: PackageModel,
    pub status: SubscriptionStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentTransactionModel {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub amount_minor: i32,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentTransactionEntity> for PaymentTransactionModel {
    fn from(value: PaymentTransactionEntity) -> Self {
        Self {
            id: value.id,
            subscription_id: value.subscription_id,
            amount_minor: value.amount_minor,
            status: PaymentStatus::from_str(&value.status),
            created_at: value.created_at,
        }
    }
}
