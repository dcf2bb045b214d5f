//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use store_core::entities::{User, UserCounterDelta};
use store_core::error::DomainError;
use store_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock a user row for the rest of the transaction
pub(super) async fn lock_user(conn: &mut PgConnection, id: i64) -> RepoResult<User> {
    let model = sqlx::query_as::<_, UserModel>(
        r"
        SELECT id, name, role, balance, transaction_count, purchased_count, total_spent,
               is_telegram, banned, created_at, updated_at
        FROM users
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    model.map(User::from).ok_or_else(|| user_not_found(id))
}

/// Increment purchase counters and debit the balance in one statement
pub(super) async fn apply_user_counters(
    conn: &mut PgConnection,
    id: i64,
    delta: UserCounterDelta,
    debit: i64,
) -> RepoResult<User> {
    let model = sqlx::query_as::<_, UserModel>(
        r"
        UPDATE users
        SET transaction_count = transaction_count + $2,
            purchased_count = purchased_count + $3,
            total_spent = total_spent + $4,
            balance = balance - $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, role, balance, transaction_count, purchased_count, total_spent,
                  is_telegram, banned, created_at, updated_at
        ",
    )
    .bind(id)
    .bind(delta.transactions)
    .bind(delta.purchased)
    .bind(delta.spent)
    .bind(debit)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    model.map(User::from).ok_or_else(|| user_not_found(id))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, role, balance, transaction_count, purchased_count, total_spent,
                   is_telegram, banned, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, role, balance, transaction_count, purchased_count,
                               total_spent, is_telegram, banned, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.role)
        .bind(user.balance)
        .bind(user.transaction_count)
        .bind(user.purchased_count)
        .bind(user.total_spent)
        .bind(user.is_telegram)
        .bind(user.banned)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UserAlreadyExists(user.id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, role, balance, transaction_count, purchased_count, total_spent,
                   is_telegram, banned, created_at, updated_at
            FROM users
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_telegram(&self) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, role, balance, transaction_count, purchased_count, total_spent,
                   is_telegram, banned, created_at, updated_at
            FROM users
            WHERE is_telegram
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_balance(&self, id: i64, amount: i64) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, role, balance, transaction_count, purchased_count, total_spent,
                      is_telegram, banned, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: i64, role: &str) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, role, balance, transaction_count, purchased_count, total_spent,
                      is_telegram, banned, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn set_banned(&self, id: i64, banned: bool) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET banned = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, role, balance, transaction_count, purchased_count, total_spent,
                      is_telegram, banned, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(banned)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn add_counters(&self, id: i64, delta: UserCounterDelta) -> RepoResult<User> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        apply_user_counters(&mut conn, id, delta, 0).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
