//! Transaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for transactions table
#[derive(Debug, Clone, FromRow)]
pub struct TransactionModel {
    pub id: i64,
    pub user_id: i64,
    pub bot_id: i64,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub price: i64,
    pub total_amount: i64,
    pub status: String,
    pub accounts: Vec<String>,
    pub payment_method: String,
    pub terms: String,
    pub reference_id: String,
    pub created_at: DateTime<Utc>,
}
