//! Aggregation row models

use sqlx::FromRow;

/// One group of the per-product sales aggregation
#[derive(Debug, Clone, FromRow)]
pub struct ProductSalesModel {
    pub product_id: String,
    pub product_name: String,
    pub total_units: i64,
    pub total_revenue: i64,
}
