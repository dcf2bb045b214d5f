//! Test fixtures and data generators
//!
//! Wire types mirror the JSON the API emits, field names included.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::Deserialize;
use serde_json::json;

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(0);

/// Get a unique id for users and bots
///
/// Time-based so reruns against the same database do not collide.
pub fn unique_id() -> i64 {
    let micros = chrono::Utc::now().timestamp_micros();
    micros * 100 + COUNTER.fetch_add(1, Ordering::SeqCst) % 100
}

/// `productData` for `/api/product/add`
pub fn product_data(id: &str, name: &str, price: i64) -> String {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "desc": format!("{name} premium"),
        "snk": "No refunds",
    })
    .to_string()
}

/// Success envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub balance: i64,
    pub transaksi: i64,
    pub membeli: i64,
    #[serde(rename = "total_nominal_transaksi")]
    pub total_nominal_transaksi: i64,
    pub is_telegram: bool,
    pub banned: bool,
}

#[derive(Debug, Deserialize)]
pub struct BotBody {
    pub id: i64,
    pub name: String,
    pub terjual: i64,
    pub transaksi: i64,
    pub soldtoday: i64,
    pub trxtoday: i64,
    pub total_nominal_transaksi: i64,
    pub nominaltoday: i64,
}

#[derive(Debug, Deserialize)]
pub struct BotDetailBody {
    #[serde(flatten)]
    pub bot: BotBody,
    pub product: BTreeMap<String, ProductBody>,
    pub product_view: BTreeMap<String, CategoryBody>,
}

#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub desc: String,
    pub snk: String,
    pub terjual: i64,
    pub account: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductSummaryBody {
    pub id: String,
    pub stock: i64,
    pub terjual: i64,
}

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub id: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductViewBody {
    pub exist: bool,
    pub id: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBody {
    pub product_id: String,
    pub stock: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBody {
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
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseBody {
    pub transaction: TransactionBody,
    pub accounts: Vec<String>,
    pub remaining_stock: i64,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsBody {
    pub total_users: i64,
    pub total_transactions: i64,
    pub total_products: i64,
    pub total_revenue: i64,
    pub total_products_sold: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotTotalsBody {
    pub total_pcs: i64,
    pub total_pendapatan: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSalesBody {
    #[serde(rename = "_id")]
    pub product_id: String,
    pub product_name: String,
    pub total_pcs: i64,
    pub total_revenue: i64,
}
