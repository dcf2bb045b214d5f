//! PostgreSQL implementation of TransactionRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use store_core::entities::{NewTransaction, Transaction};
use store_core::traits::{HistoryQuery, RepoResult, TransactionRepository};

use crate::mappers::TransactionInsert;
use crate::models::TransactionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of TransactionRepository
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    /// Create a new PgTransactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Write a history record on an existing connection or transaction
pub(super) async fn insert_transaction(
    conn: &mut PgConnection,
    insert: &TransactionInsert<'_>,
) -> RepoResult<Transaction> {
    let model = sqlx::query_as::<_, TransactionModel>(
        r"
        INSERT INTO transactions (user_id, bot_id, product_id, product_name, quantity, price,
                                  total_amount, status, accounts, payment_method, terms,
                                  reference_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id, user_id, bot_id, product_id, product_name, quantity, price, total_amount,
                  status, accounts, payment_method, terms, reference_id, created_at
        ",
    )
    .bind(insert.user_id)
    .bind(insert.bot_id)
    .bind(insert.product_id)
    .bind(insert.product_name)
    .bind(insert.quantity)
    .bind(insert.price)
    .bind(insert.total_amount)
    .bind(insert.status)
    .bind(insert.accounts)
    .bind(insert.payment_method)
    .bind(insert.terms)
    .bind(insert.reference_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(Transaction::from(model))
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    #[instrument(skip(self, transaction), fields(user_id = %transaction.user_id, bot_id = %transaction.bot_id))]
    async fn create(&self, transaction: &NewTransaction) -> RepoResult<Transaction> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        insert_transaction(&mut conn, &TransactionInsert::new(transaction)).await
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: i64,
        query: HistoryQuery,
    ) -> RepoResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionModel>(
            r"
            SELECT id, user_id, bot_id, product_id, product_name, quantity, price, total_amount,
                   status, accounts, payment_method, terms, reference_id, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(query.limit)
        .bind(query.skip)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_bot(&self, bot_id: i64, query: HistoryQuery) -> RepoResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionModel>(
            r"
            SELECT id, user_id, bot_id, product_id, product_name, quantity, price, total_amount,
                   status, accounts, payment_method, terms, reference_id, created_at
            FROM transactions
            WHERE bot_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(bot_id)
        .bind(query.limit)
        .bind(query.skip)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_bot(&self, bot_id: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions WHERE bot_id = $1")
            .bind(bot_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
