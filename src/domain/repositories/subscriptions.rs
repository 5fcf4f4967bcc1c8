use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    payment_transactions::PaymentTransactionEntity,
    subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
};

#[automock]
#[async_trait]
pub trait SubscriptionRepository {
    /// Active and not past its end date, at most one per subject.
    async fn find_active(&self, user_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    /// Closes whatever subscription is currently active for the subject and
    /// opens the given one, in a single transaction. When
    /// `payment_amount_minor` is set, a payment transaction for the new
    /// subscription is recorded in the same transaction.
    async fn replace_active(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
        payment_amount_minor: Option<i32>,
    ) -> Result<Uuid>;

    async fn list_history(&self, user_id: Uuid) -> Result<Vec<SubscriptionEntity>>;

    async fn list_payment_transactions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PaymentTransactionEntity>>;
}
