//! PostgreSQL implementation of ProductRepository
//!
//! The pool lives in `product_accounts`; FIFO order is `seq` order. Every
//! removal from a pool happens while the owning `products` row is locked with
//! `SELECT ... FOR UPDATE`, so concurrent takes on one product serialize and
//! never hand out the same account twice.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use store_core::entities::{BotCounterDelta, Product, ProductEdit, ProductSummary};
use store_core::error::DomainError;
use store_core::traits::{ProductRepository, RepoResult};

use crate::mappers::product_with_accounts;
use crate::models::{ProductModel, ProductSummaryModel};

use super::bot::apply_bot_counters;
use super::error::{
    bot_not_found, map_db_error, map_foreign_key_violation, map_unique_violation,
    missing_product,
};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new PgProductRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock a product row for the rest of the transaction
pub(super) async fn lock_product(
    conn: &mut PgConnection,
    bot_id: i64,
    product_id: &str,
) -> RepoResult<ProductModel> {
    let model = sqlx::query_as::<_, ProductModel>(
        r"
        SELECT bot_id, id, name, price, description, terms, sold, created_at, updated_at
        FROM products
        WHERE bot_id = $1 AND id = $2
        FOR UPDATE
        ",
    )
    .bind(bot_id)
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    match model {
        Some(model) => Ok(model),
        None => Err(missing_product(conn, bot_id, product_id).await),
    }
}

/// Number of accounts in a product's pool
pub(super) async fn pool_depth(
    conn: &mut PgConnection,
    bot_id: i64,
    product_id: &str,
) -> RepoResult<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM product_accounts WHERE bot_id = $1 AND product_id = $2",
    )
    .bind(bot_id)
    .bind(product_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)
}

/// Remove the first `quantity` accounts of a pool whose product row is locked
///
/// Returns the taken accounts in FIFO order and the depth left behind.
pub(super) async fn take_locked(
    conn: &mut PgConnection,
    bot_id: i64,
    product_id: &str,
    quantity: i64,
) -> RepoResult<(Vec<String>, i64)> {
    let available = pool_depth(conn, bot_id, product_id).await?;
    if available < quantity {
        return Err(DomainError::InsufficientStock {
            product_id: product_id.to_string(),
            requested: quantity,
            available,
        });
    }

    let mut taken = sqlx::query_as::<_, (i64, String)>(
        r"
        DELETE FROM product_accounts
        WHERE seq IN (
            SELECT seq FROM product_accounts
            WHERE bot_id = $1 AND product_id = $2
            ORDER BY seq
            LIMIT $3
        )
        RETURNING seq, account
        ",
    )
    .bind(bot_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    taken.sort_by_key(|(seq, _)| *seq);
    let accounts = taken.into_iter().map(|(_, account)| account).collect();
    Ok((accounts, available - quantity))
}

/// Increment a product's sold counter; `None` when the row is absent
pub(super) async fn increment_product_sold(
    conn: &mut PgConnection,
    bot_id: i64,
    product_id: &str,
    quantity: i64,
) -> RepoResult<Option<ProductModel>> {
    sqlx::query_as::<_, ProductModel>(
        r"
        UPDATE products
        SET sold = sold + $3, updated_at = NOW()
        WHERE bot_id = $1 AND id = $2
        RETURNING bot_id, id, name, price, description, terms, sold, created_at, updated_at
        ",
    )
    .bind(bot_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)
}

/// Load a product's pool in FIFO order
async fn load_accounts(
    conn: &mut PgConnection,
    bot_id: i64,
    product_id: &str,
) -> RepoResult<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r"
        SELECT account FROM product_accounts
        WHERE bot_id = $1 AND product_id = $2
        ORDER BY seq
        ",
    )
    .bind(bot_id)
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn find(&self, bot_id: i64, product_id: &str) -> RepoResult<Option<Product>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT bot_id, id, name, price, description, terms, sold, created_at, updated_at
            FROM products
            WHERE bot_id = $1 AND id = $2
            ",
        )
        .bind(bot_id)
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

        match model {
            Some(model) => {
                let accounts = load_accounts(&mut conn, bot_id, product_id).await?;
                Ok(Some(product_with_accounts(model, accounts)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_bot(&self, bot_id: i64) -> RepoResult<Vec<ProductSummary>> {
        let rows = sqlx::query_as::<_, ProductSummaryModel>(
            r"
            SELECT p.id, p.name, p.price, p.description, p.terms, p.sold,
                   (SELECT COUNT(*) FROM product_accounts a
                    WHERE a.bot_id = p.bot_id AND a.product_id = p.id) AS stock
            FROM products p
            WHERE p.bot_id = $1
            ORDER BY p.created_at, p.id
            ",
        )
        .bind(bot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ProductSummary::from).collect())
    }

    #[instrument(skip(self, product), fields(bot_id = %product.bot_id, product_id = %product.id))]
    async fn create(&self, product: &Product) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO products (bot_id, id, name, price, description, terms, sold)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(product.bot_id)
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.terms)
        .bind(product.sold)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                return bot_not_found(product.bot_id);
            }
            map_unique_violation(e, || DomainError::ProductAlreadyExists(product.id.clone()))
        })?;

        if !product.accounts.is_empty() {
            insert_accounts(&mut tx, product.bot_id, &product.id, &product.accounts).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_field(
        &self,
        bot_id: i64,
        product_id: &str,
        edit: ProductEdit,
    ) -> RepoResult<Product> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        let (name, price, description, terms) = match edit {
            ProductEdit::Name(name) => (Some(name), None, None, None),
            ProductEdit::Price(price) => (None, Some(price), None, None),
            ProductEdit::Description(description) => (None, None, Some(description), None),
            ProductEdit::Terms(terms) => (None, None, None, Some(terms)),
        };

        // Untouched columns keep their stored value
        let model = sqlx::query_as::<_, ProductModel>(
            r"
            UPDATE products
            SET name = COALESCE($3, name),
                price = COALESCE($4, price),
                description = COALESCE($5, description),
                terms = COALESCE($6, terms),
                updated_at = NOW()
            WHERE bot_id = $1 AND id = $2
            RETURNING bot_id, id, name, price, description, terms, sold, created_at, updated_at
            ",
        )
        .bind(bot_id)
        .bind(product_id)
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(terms)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

        let Some(model) = model else {
            return Err(missing_product(&mut conn, bot_id, product_id).await);
        };
        let accounts = load_accounts(&mut conn, bot_id, product_id).await?;

        Ok(product_with_accounts(model, accounts))
    }

    #[instrument(skip(self))]
    async fn change_id(&self, bot_id: i64, old_id: &str, new_id: &str) -> RepoResult<Product> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_product(&mut tx, bot_id, old_id).await?;

        // Pool rows follow through ON UPDATE CASCADE
        let model = sqlx::query_as::<_, ProductModel>(
            r"
            UPDATE products
            SET id = $3, updated_at = NOW()
            WHERE bot_id = $1 AND id = $2
            RETURNING bot_id, id, name, price, description, terms, sold, created_at, updated_at
            ",
        )
        .bind(bot_id)
        .bind(old_id)
        .bind(new_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::ProductAlreadyExists(new_id.to_string()))
        })?;

        sqlx::query(
            r"
            UPDATE categories
            SET product_ids = array_replace(product_ids, $2, $3)
            WHERE bot_id = $1 AND $2 = ANY(product_ids)
            ",
        )
        .bind(bot_id)
        .bind(old_id)
        .bind(new_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let accounts = load_accounts(&mut tx, bot_id, new_id).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(bot_id = %bot_id, old_id, new_id, "Product id changed");
        Ok(product_with_accounts(model, accounts))
    }

    #[instrument(skip(self))]
    async fn delete(&self, bot_id: i64, product_id: &str) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        // Pool rows go with the product; transactions keep their copy
        let result = sqlx::query("DELETE FROM products WHERE bot_id = $1 AND id = $2")
            .bind(bot_id)
            .bind(product_id)
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(missing_product(&mut conn, bot_id, product_id).await);
        }

        Ok(())
    }

    #[instrument(skip(self, accounts), fields(count = accounts.len()))]
    async fn add_accounts(
        &self,
        bot_id: i64,
        product_id: &str,
        accounts: &[String],
    ) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_product(&mut tx, bot_id, product_id).await?;
        insert_accounts(&mut tx, bot_id, product_id, accounts).await?;
        let stock = pool_depth(&mut tx, bot_id, product_id).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(stock)
    }

    #[instrument(skip(self))]
    async fn peek_accounts(
        &self,
        bot_id: i64,
        product_id: &str,
        limit: i64,
    ) -> RepoResult<Vec<String>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE bot_id = $1 AND id = $2)",
        )
        .bind(bot_id)
        .bind(product_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

        if !exists {
            return Err(missing_product(&mut conn, bot_id, product_id).await);
        }

        sqlx::query_scalar::<_, String>(
            r"
            SELECT account FROM product_accounts
            WHERE bot_id = $1 AND product_id = $2
            ORDER BY seq
            LIMIT $3
            ",
        )
        .bind(bot_id)
        .bind(product_id)
        .bind(limit.max(0))
        .fetch_all(&mut *conn)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn take_accounts(
        &self,
        bot_id: i64,
        product_id: &str,
        quantity: i64,
    ) -> RepoResult<Vec<String>> {
        if quantity < 1 {
            return Err(DomainError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_product(&mut tx, bot_id, product_id).await?;
        let (accounts, remaining) = take_locked(&mut tx, bot_id, product_id, quantity).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(bot_id = %bot_id, product_id, quantity, remaining, "Stock taken");
        Ok(accounts)
    }

    #[instrument(skip(self))]
    async fn add_sold(&self, bot_id: i64, product_id: &str, quantity: i64) -> RepoResult<Product> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let Some(model) = increment_product_sold(&mut tx, bot_id, product_id, quantity).await?
        else {
            return Err(missing_product(&mut tx, bot_id, product_id).await);
        };

        apply_bot_counters(&mut tx, bot_id, BotCounterDelta::sold(quantity)).await?;

        let accounts = load_accounts(&mut tx, bot_id, product_id).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(product_with_accounts(model, accounts))
    }

    #[instrument(skip(self))]
    async fn count_by_bot(&self, bot_id: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE bot_id = $1")
            .bind(bot_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

/// Append accounts to the end of a pool, preserving their order
async fn insert_accounts(
    conn: &mut PgConnection,
    bot_id: i64,
    product_id: &str,
    accounts: &[String],
) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO product_accounts (bot_id, product_id, account)
        SELECT $1, $2, t.account
        FROM UNNEST($3::TEXT[]) WITH ORDINALITY AS t(account, n)
        ORDER BY t.n
        ",
    )
    .bind(bot_id)
    .bind(product_id)
    .bind(accounts)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_foreign_key_violation(e, || bot_not_found(bot_id)))?;

    Ok(())
}
