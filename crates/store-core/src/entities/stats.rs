//! Aggregation results over the transaction log and bot dashboards

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Units and revenue for one product id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSales {
    pub product_id: String,
    pub product_name: String,
    pub total_units: i64,
    pub total_revenue: i64,
}

/// Sum of a bot's per-product groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotTotals {
    pub total_units: i64,
    pub total_revenue: i64,
}

impl BotTotals {
    pub fn from_sales(sales: &[ProductSales]) -> Self {
        sales.iter().fold(Self::default(), |acc, row| Self {
            total_units: acc.total_units + row.total_units,
            total_revenue: acc.total_revenue + row.total_revenue,
        })
    }
}

/// Inclusive `[start, end]` time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::ValidationError(
                "end must not be before start".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Admin dashboard for one bot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_transactions: i64,
    pub total_products: i64,
    pub total_revenue: i64,
    pub total_products_sold: i64,
}

/// Public dashboard for one bot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicStats {
    pub total_revenue: i64,
    pub total_products_sold: i64,
}
