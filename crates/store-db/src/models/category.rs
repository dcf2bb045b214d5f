//! Category database model

use sqlx::FromRow;

/// Database model for categories table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub bot_id: i64,
    pub name: String,
    pub product_ids: Vec<String>,
}
