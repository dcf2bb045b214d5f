//! Error handling utilities for repositories

use sqlx::{Error as SqlxError, PgConnection};
use store_core::error::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for foreign key violation and return appropriate error or fallback
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: i64) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "bot not found" error
pub fn bot_not_found(id: i64) -> DomainError {
    DomainError::BotNotFound(id)
}

/// Create a "product not found" error
pub fn product_not_found(bot_id: i64, product_id: &str) -> DomainError {
    DomainError::ProductNotFound {
        bot_id,
        product_id: product_id.to_string(),
    }
}

/// Create a "category not found" error
pub fn category_not_found(bot_id: i64, name: &str) -> DomainError {
    DomainError::CategoryNotFound {
        bot_id,
        name: name.to_string(),
    }
}

/// Explain a missing product row: either the bot or the product is absent
pub async fn missing_product(
    conn: &mut PgConnection,
    bot_id: i64,
    product_id: &str,
) -> DomainError {
    let bot_exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bots WHERE id = $1)")
        .bind(bot_id)
        .fetch_one(&mut *conn)
        .await;

    match bot_exists {
        Ok(true) => product_not_found(bot_id, product_id),
        Ok(false) => bot_not_found(bot_id),
        Err(e) => map_db_error(e),
    }
}
