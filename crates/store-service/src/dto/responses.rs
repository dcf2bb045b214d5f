//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names
//! follow the storefront's established wire format, which bots already
//! parse, so several fields keep their historical names.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Success envelope: `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Root banner
#[derive(Debug, Clone, Serialize)]
pub struct BannerResponse {
    pub message: String,
}

impl BannerResponse {
    pub fn running() -> Self {
        Self {
            message: "API Database is Running. Use defined endpoints.".to_string(),
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub balance: i64,
    #[serde(rename = "transaksi")]
    pub transaction_count: i64,
    #[serde(rename = "membeli")]
    pub purchased_count: i64,
    #[serde(rename = "total_nominal_transaksi")]
    pub total_spent: i64,
    pub is_telegram: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Bot Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "terjual")]
    pub sold: i64,
    #[serde(rename = "transaksi")]
    pub transaction_count: i64,
    #[serde(rename = "soldtoday")]
    pub sold_today: i64,
    #[serde(rename = "trxtoday")]
    pub transactions_today: i64,
    #[serde(rename = "total_nominal_transaksi")]
    pub revenue: i64,
    #[serde(rename = "nominaltoday")]
    pub revenue_today: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bot with its whole catalog
#[derive(Debug, Clone, Serialize)]
pub struct BotDetailResponse {
    #[serde(flatten)]
    pub bot: BotResponse,
    /// Products keyed by id
    pub product: BTreeMap<String, ProductResponse>,
    /// Categories keyed by name
    pub product_view: BTreeMap<String, CategoryResponse>,
}

// ============================================================================
// Product Responses
// ============================================================================

/// Full product including its account pool
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub desc: String,
    pub snk: String,
    pub terjual: i64,
    pub account: Vec<String>,
}

/// Catalog listing entry; the pool is reduced to its depth
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummaryResponse {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub desc: String,
    pub snk: String,
    pub stock: i64,
    pub terjual: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub product_id: String,
    pub stock: i64,
}

// ============================================================================
// Category Responses
// ============================================================================

/// Product view: the ordered product ids of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryResponse {
    pub id: Vec<String>,
}

/// Result of creating a product view; `exist` is set when it was already there
#[derive(Debug, Clone, Serialize)]
pub struct ProductViewResponse {
    pub exist: bool,
    pub id: Vec<String>,
}

// ============================================================================
// Transaction Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
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
    pub snk: String,
    pub reff_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub transaction: TransactionResponse,
    pub accounts: Vec<String>,
    pub remaining_stock: i64,
    pub balance: i64,
}

// ============================================================================
// Stats Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub total_users: i64,
    pub total_transactions: i64,
    pub total_products: i64,
    pub total_revenue: i64,
    pub total_products_sold: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatsResponse {
    pub total_revenue: i64,
    pub total_products_sold: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotTotalsResponse {
    pub total_pcs: i64,
    pub total_pendapatan: i64,
}

/// Per-product reduction over the transaction log
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSalesResponse {
    #[serde(rename = "_id")]
    pub product_id: String,
    pub product_name: String,
    pub total_pcs: i64,
    pub total_revenue: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
