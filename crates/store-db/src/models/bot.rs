//! Bot database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for bots table
#[derive(Debug, Clone, FromRow)]
pub struct BotModel {
    pub id: i64,
    pub name: String,
    pub sold: i64,
    pub transaction_count: i64,
    pub sold_today: i64,
    pub transactions_today: i64,
    pub revenue: i64,
    pub revenue_today: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
