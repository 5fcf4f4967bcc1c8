use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            payment_transactions::{InsertPaymentTransactionEntity, PaymentTransactionEntity},
            subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        },
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::{
            payment_statuses::PaymentStatus, subscription_statuses::SubscriptionStatus,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{payment_transactions, subscriptions},
    },
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_active(&self, user_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Expiry is computed at read time; rows past their end date never
        // count as active.
        let result = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .filter(
                subscriptions::ended_at
                    .is_null()
                    .or(subscriptions::ended_at.gt(Utc::now())),
            )
            .order(subscriptions::created_at.desc())
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn replace_active(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
        payment_amount_minor: Option<i32>,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let now = Utc::now();
        let new_id = conn.transaction::<Uuid, diesel::result::Error, _>(|conn| {
            update(subscriptions::table)
                .filter(subscriptions::user_id.eq(insert_subscription_entity.user_id))
                .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
                .set((
                    subscriptions::status.eq(SubscriptionStatus::Canceled.to_string()),
                    subscriptions::ended_at.eq(Some(now)),
                    subscriptions::canceled_at.eq(Some(now)),
                ))
                .execute(conn)?;

            let new_id = insert_into(subscriptions::table)
                .values(&insert_subscription_entity)
                .returning(subscriptions::id)
                .get_result::<Uuid>(conn)?;

            if let Some(amount_minor) = payment_amount_minor {
                insert_into(payment_transactions::table)
                    .values(&InsertPaymentTransactionEntity {
                        subscription_id: new_id,
                        user_id: insert_subscription_entity.user_id,
                        amount_minor,
                        status: PaymentStatus::Succeeded.to_string(),
                        created_at: now,
                    })
                    .execute(conn)?;
            }

            Ok(new_id)
        })?;

        Ok(new_id)
    }

    async fn list_history(&self, user_id: Uuid) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .order(subscriptions::created_at.desc())
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_payment_transactions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PaymentTransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payment_transactions::table
            .filter(payment_transactions::user_id.eq(user_id))
            .order(payment_transactions::created_at.desc())
            .select(PaymentTransactionEntity::as_select())
            .load::<PaymentTransactionEntity>(&mut conn)?;

        Ok(results)
    }
}
