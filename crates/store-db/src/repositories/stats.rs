//! PostgreSQL implementation of StatsRepository
//!
//! All reductions only count transactions with status `completed`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use store_core::entities::{DateRange, ProductSales};
use store_core::traits::{RepoResult, StatsRepository};

use crate::models::ProductSalesModel;

use super::error::map_db_error;

/// PostgreSQL implementation of StatsRepository
#[derive(Clone)]
pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    /// Create a new PgStatsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    #[instrument(skip(self))]
    async fn sales_per_product(&self, bot_id: Option<i64>) -> RepoResult<Vec<ProductSales>> {
        // product_name is the name on the earliest record of each group
        let rows = sqlx::query_as::<_, ProductSalesModel>(
            r"
            SELECT product_id,
                   (ARRAY_AGG(product_name ORDER BY created_at, id))[1] AS product_name,
                   COALESCE(SUM(quantity), 0)::BIGINT AS total_units,
                   COALESCE(SUM(total_amount), 0)::BIGINT AS total_revenue
            FROM transactions
            WHERE status = 'completed'
              AND ($1::BIGINT IS NULL OR bot_id = $1)
            GROUP BY product_id
            ORDER BY total_units DESC, product_id
            ",
        )
        .bind(bot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ProductSales::from).collect())
    }

    #[instrument(skip(self))]
    async fn total_revenue(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(total_amount), 0)::BIGINT
            FROM transactions
            WHERE status = 'completed'
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn revenue_between(&self, range: DateRange) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(total_amount), 0)::BIGINT
            FROM transactions
            WHERE status = 'completed'
              AND created_at >= $1 AND created_at <= $2
            ",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn total_units(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(quantity), 0)::BIGINT
            FROM transactions
            WHERE status = 'completed'
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn units_for_product(&self, product_id: &str) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(quantity), 0)::BIGINT
            FROM transactions
            WHERE status = 'completed' AND product_id = $1
            ",
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
