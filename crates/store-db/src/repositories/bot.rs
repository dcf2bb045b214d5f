//! PostgreSQL implementation of BotRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use store_core::entities::{Bot, BotCatalog, BotCounterDelta, Category, Product};
use store_core::error::DomainError;
use store_core::traits::{BotRepository, RepoResult};

use crate::mappers::{group_accounts, product_with_accounts};
use crate::models::{BotModel, CategoryModel, ProductAccountModel, ProductModel};

use super::error::{bot_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of BotRepository
#[derive(Clone)]
pub struct PgBotRepository {
    pool: PgPool,
}

impl PgBotRepository {
    /// Create a new PgBotRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load every product of a bot with its pool
    async fn load_products(&self, bot_id: i64) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT bot_id, id, name, price, description, terms, sold, created_at, updated_at
            FROM products
            WHERE bot_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(bot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let accounts = sqlx::query_as::<_, ProductAccountModel>(
            r"
            SELECT seq, product_id, account
            FROM product_accounts
            WHERE bot_id = $1
            ORDER BY seq
            ",
        )
        .bind(bot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut pools = group_accounts(accounts);
        Ok(products
            .into_iter()
            .map(|model| {
                let pool = pools.remove(&model.id).unwrap_or_default();
                product_with_accounts(model, pool)
            })
            .collect())
    }
}

/// Increment a bot's counters in one statement
pub(super) async fn apply_bot_counters(
    conn: &mut PgConnection,
    id: i64,
    delta: BotCounterDelta,
) -> RepoResult<Bot> {
    let model = sqlx::query_as::<_, BotModel>(
        r"
        UPDATE bots
        SET transaction_count = transaction_count + $2,
            sold = sold + $3,
            sold_today = sold_today + $4,
            transactions_today = transactions_today + $5,
            revenue = revenue + $6,
            revenue_today = revenue_today + $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, sold, transaction_count, sold_today, transactions_today,
                  revenue, revenue_today, created_at, updated_at
        ",
    )
    .bind(id)
    .bind(delta.transactions)
    .bind(delta.sold)
    .bind(delta.sold_today)
    .bind(delta.transactions_today)
    .bind(delta.revenue)
    .bind(delta.revenue_today)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    model.map(Bot::from).ok_or_else(|| bot_not_found(id))
}

#[async_trait]
impl BotRepository for PgBotRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Bot>> {
        let result = sqlx::query_as::<_, BotModel>(
            r"
            SELECT id, name, sold, transaction_count, sold_today, transactions_today,
                   revenue, revenue_today, created_at, updated_at
            FROM bots
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Bot::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bots WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(bot_id = %bot.id))]
    async fn create(&self, bot: &Bot) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO bots (id, name, sold, transaction_count, sold_today, transactions_today,
                              revenue, revenue_today, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(bot.id)
        .bind(&bot.name)
        .bind(bot.sold)
        .bind(bot.transaction_count)
        .bind(bot.sold_today)
        .bind(bot.transactions_today)
        .bind(bot.revenue)
        .bind(bot.revenue_today)
        .bind(bot.created_at)
        .bind(bot.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::BotAlreadyExists(bot.id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_catalog(&self, id: i64) -> RepoResult<Option<BotCatalog>> {
        let Some(bot) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let products = self.load_products(id).await?;

        let categories = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT bot_id, name, product_ids
            FROM categories
            WHERE bot_id = $1
            ORDER BY name
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Some(BotCatalog {
            bot,
            products,
            categories: categories.into_iter().map(Category::from).collect(),
        }))
    }

    #[instrument(skip(self))]
    async fn apply_counters(&self, id: i64, delta: BotCounterDelta) -> RepoResult<Bot> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        apply_bot_counters(&mut conn, id, delta).await
    }

    #[instrument(skip(self))]
    async fn reset_today(&self, id: i64) -> RepoResult<Bot> {
        let result = sqlx::query_as::<_, BotModel>(
            r"
            UPDATE bots
            SET sold_today = 0, transactions_today = 0, revenue_today = 0, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, sold, transaction_count, sold_today, transactions_today,
                      revenue, revenue_today, created_at, updated_at
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Bot::from).ok_or_else(|| bot_not_found(id))
    }
}
