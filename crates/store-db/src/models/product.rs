//! Product and inventory pool database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for products table
#[derive(Debug, Clone, FromRow)]
pub struct ProductModel {
    pub bot_id: i64,
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub terms: String,
    pub sold: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product row joined with its pool depth
#[derive(Debug, Clone, FromRow)]
pub struct ProductSummaryModel {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub terms: String,
    pub sold: i64,
    pub stock: i64,
}

/// Database model for product_accounts table
#[derive(Debug, Clone, FromRow)]
pub struct ProductAccountModel {
    pub seq: i64,
    pub product_id: String,
    pub account: String,
}
