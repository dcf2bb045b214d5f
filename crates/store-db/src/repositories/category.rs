//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use store_core::entities::Category;
use store_core::error::DomainError;
use store_core::traits::{CategoryRepository, RepoResult};

use crate::models::CategoryModel;

use super::error::{bot_not_found, category_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_by_bot(&self, bot_id: i64) -> RepoResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT bot_id, name, product_ids
            FROM categories
            WHERE bot_id = $1
            ORDER BY name
            ",
        )
        .bind(bot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn find(&self, bot_id: i64, name: &str) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT bot_id, name, product_ids
            FROM categories
            WHERE bot_id = $1 AND name = $2
            ",
        )
        .bind(bot_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, category: &Category) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO categories (bot_id, name, product_ids)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(category.bot_id)
        .bind(&category.name)
        .bind(&category.product_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                return bot_not_found(category.bot_id);
            }
            map_unique_violation(e, || DomainError::CategoryAlreadyExists(category.name.clone()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn replace(
        &self,
        bot_id: i64,
        name: &str,
        product_ids: &[String],
    ) -> RepoResult<Category> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            UPDATE categories
            SET product_ids = $3
            WHERE bot_id = $1 AND name = $2
            RETURNING bot_id, name, product_ids
            ",
        )
        .bind(bot_id)
        .bind(name)
        .bind(product_ids)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Category::from)
            .ok_or_else(|| category_not_found(bot_id, name))
    }

    #[instrument(skip(self))]
    async fn append(
        &self,
        bot_id: i64,
        name: &str,
        product_ids: &[String],
    ) -> RepoResult<Category> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            UPDATE categories
            SET product_ids = product_ids || $3::TEXT[]
            WHERE bot_id = $1 AND name = $2
            RETURNING bot_id, name, product_ids
            ",
        )
        .bind(bot_id)
        .bind(name)
        .bind(product_ids)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Category::from)
            .ok_or_else(|| category_not_found(bot_id, name))
    }

    #[instrument(skip(self))]
    async fn delete(&self, bot_id: i64, name: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE bot_id = $1 AND name = $2")
            .bind(bot_id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(bot_id, name));
        }

        Ok(())
    }
}
