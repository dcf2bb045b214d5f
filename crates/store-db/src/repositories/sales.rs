//! PostgreSQL implementation of SalesRepository
//!
//! Each operation runs in a single database transaction. Locks are always
//! taken product first, then user, so concurrent purchases cannot deadlock.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use store_core::entities::{
    Bot, BotCounterDelta, NewTransaction, Purchase, PurchaseReceipt, UserCounterDelta,
};
use store_core::traits::{RepoResult, SalesRepository};

use crate::mappers::TransactionInsert;

use super::bot::apply_bot_counters;
use super::error::map_db_error;
use super::product::{increment_product_sold, lock_product, take_locked};
use super::transaction::insert_transaction;
use super::user::{apply_user_counters, lock_user};

/// PostgreSQL implementation of SalesRepository
#[derive(Clone)]
pub struct PgSalesRepository {
    pool: PgPool,
}

impl PgSalesRepository {
    /// Create a new PgSalesRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesRepository for PgSalesRepository {
    #[instrument(skip(self))]
    async fn record_sale(
        &self,
        bot_id: i64,
        product_id: &str,
        quantity: i64,
        final_price: i64,
    ) -> RepoResult<Bot> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let bot =
            apply_bot_counters(&mut tx, bot_id, BotCounterDelta::sale(quantity, final_price))
                .await?;

        // An unknown product code still books the bot-level sale
        let product = increment_product_sold(&mut tx, bot_id, product_id, quantity).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            bot_id = %bot_id,
            product_id,
            quantity,
            final_price,
            product_found = product.is_some(),
            "Sale recorded"
        );
        Ok(bot)
    }

    #[instrument(skip(self, purchase), fields(bot_id = %purchase.bot_id, product_id = %purchase.product_id, user_id = %purchase.user_id))]
    async fn purchase(&self, purchase: &Purchase) -> RepoResult<PurchaseReceipt> {
        purchase.validate()?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let product = lock_product(&mut tx, purchase.bot_id, &purchase.product_id).await?;
        let user = lock_user(&mut tx, purchase.user_id).await?;

        let total = product.price.saturating_mul(purchase.quantity);
        let debit = if purchase.pays_with_balance() { total } else { 0 };
        user.ensure_can_spend(debit)?;

        let (accounts, remaining_stock) =
            take_locked(&mut tx, purchase.bot_id, &purchase.product_id, purchase.quantity).await?;

        increment_product_sold(&mut tx, purchase.bot_id, &purchase.product_id, purchase.quantity)
            .await?;
        apply_bot_counters(
            &mut tx,
            purchase.bot_id,
            BotCounterDelta::purchase(purchase.quantity, total),
        )
        .await?;
        let user = apply_user_counters(
            &mut tx,
            purchase.user_id,
            UserCounterDelta::purchase(purchase.quantity, total),
            debit,
        )
        .await?;

        let record = NewTransaction {
            quantity: purchase.quantity,
            accounts,
            payment_method: purchase.payment_method.clone(),
            terms: product.terms.clone(),
            reference_id: purchase.reference_id.clone(),
            ..NewTransaction::new(
                purchase.user_id,
                purchase.bot_id,
                product.id.clone(),
                product.name.clone(),
                product.price,
            )
        };
        let transaction = insert_transaction(&mut tx, &TransactionInsert::new(&record)).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            transaction_id = transaction.id,
            quantity = purchase.quantity,
            total,
            remaining_stock,
            "Purchase committed"
        );

        Ok(PurchaseReceipt {
            transaction,
            remaining_stock,
            balance: user.balance,
        })
    }
}
