//! Request DTOs for API endpoints
//!
//! Every endpoint takes its input from the query string. All request DTOs
//! implement `Deserialize` and `Validate`; parameter names are camelCase on
//! the wire.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use validator::Validate;

// ============================================================================
// Parameter helpers
// ============================================================================

/// A list parameter given either as a JSON array (`["a","b"]`) or as a
/// comma-separated string (`a,b`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParam(pub Vec<String>);

impl ListParam {
    /// Parse the raw query value
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(raw) {
            let items = items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect();
            return Self(items);
        }

        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for ListParam {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Deserialize a query value holding a JSON document
fn json_param<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = String::deserialize(deserializer)?;
    serde_json::from_str(&raw).map_err(|e| D::Error::custom(format!("invalid JSON: {e}")))
}

fn one() -> i64 {
    1
}

fn yes() -> bool {
    true
}

// ============================================================================
// User Requests
// ============================================================================

/// `?id=` for user and bot lookups
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdQuery {
    pub id: i64,
}

/// Register a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserQuery {
    pub id: i64,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Add to (or subtract from) a user's balance
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditBalanceQuery {
    pub id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditRoleQuery {
    pub id: i64,

    #[validate(length(min = 1, max = 32, message = "Role must be 1-32 characters"))]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BanUserQuery {
    pub id: i64,

    #[serde(default = "yes")]
    pub banned: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserQuery {
    pub user_id: i64,
}

/// Increment a user's purchase counters
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserTransactionQuery {
    pub user_id: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "totalTransaksi cannot be negative"))]
    pub total_transaksi: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "totalMembeli cannot be negative"))]
    pub total_membeli: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "nominal cannot be negative"))]
    pub nominal: i64,
}

// ============================================================================
// Bot Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBotQuery {
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "Bot name must be 1-100 characters"))]
    pub name: String,
}

/// `?botId=`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BotIdQuery {
    pub bot_id: i64,
}

/// Increment a bot's transaction counter and revenue
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddBotTransactionQuery {
    pub bot_id: i64,

    #[serde(default = "one")]
    #[validate(range(min = 0, message = "totalTransaksi cannot be negative"))]
    pub total_transaksi: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "totalNominal cannot be negative"))]
    pub total_nominal: i64,
}

// ============================================================================
// Category Requests
// ============================================================================

/// Category add/update/delete
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub bot_id: i64,

    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub category_name: String,

    #[serde(default)]
    pub product_ids: ListParam,
}

/// Product views are categories addressed by title
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductViewQuery {
    pub bot_id: i64,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Product ids to append
    #[serde(default)]
    pub accounts: ListParam,
}

// ============================================================================
// Product Requests
// ============================================================================

/// `productData` JSON document
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductData {
    #[validate(length(min = 1, max = 64, message = "Product id must be 1-64 characters"))]
    pub id: String,

    #[validate(length(min = 1, max = 200, message = "Product name must be 1-200 characters"))]
    pub name: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    #[serde(default)]
    pub desc: String,

    #[serde(default)]
    pub snk: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProductQuery {
    pub bot_id: i64,

    #[serde(deserialize_with = "json_param")]
    #[validate(nested)]
    pub product_data: ProductData,
}

/// `?botId=&productId=`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub bot_id: i64,

    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditNameQuery {
    pub bot_id: i64,
    pub product_id: String,

    #[validate(length(min = 1, max = 200, message = "Product name must be 1-200 characters"))]
    pub new_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditPriceQuery {
    pub bot_id: i64,
    pub product_id: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub new_price: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditDescQuery {
    pub bot_id: i64,
    pub product_id: String,

    #[serde(default)]
    pub new_desc: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditSnkQuery {
    pub bot_id: i64,
    pub product_id: String,

    #[serde(default)]
    pub new_snk: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditIdQuery {
    pub bot_id: i64,
    pub old_id: String,

    #[validate(length(min = 1, max = 64, message = "Product id must be 1-64 characters"))]
    pub new_id: String,
}

/// Append accounts to a product's pool
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddStockQuery {
    pub bot_id: i64,
    pub product_id: String,

    #[serde(default)]
    pub accounts: ListParam,
}

/// Peek or take `total` accounts
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub bot_id: i64,
    pub product_id: String,

    #[serde(default = "one")]
    #[validate(range(max = 1000, message = "total must be at most 1000"))]
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSoldQuery {
    pub bot_id: i64,
    pub product_id: String,

    #[validate(range(min = 1, message = "totalTerjual must be at least 1"))]
    pub total_terjual: i64,
}

// ============================================================================
// Transaction Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleQuery {
    pub bot_id: i64,
    pub product_code: String,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,

    #[validate(range(min = 0, message = "finalPrice cannot be negative"))]
    pub final_price: i64,
}

/// Append a history record as given
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddHistoryQuery {
    pub user_id: i64,
    pub bot_id: i64,

    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,

    #[validate(length(min = 1, message = "productName is required"))]
    pub product_name: String,

    #[serde(default = "one")]
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,

    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,

    #[serde(default)]
    pub accounts: ListParam,

    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub snk: Option<String>,
    pub reff_id: Option<String>,
}

/// Buy `quantity` units in one step
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseQuery {
    pub bot_id: i64,
    pub user_id: i64,

    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,

    #[serde(default = "one")]
    #[validate(range(min = 1, max = 1000, message = "quantity must be 1-1000"))]
    pub quantity: i64,

    pub payment_method: Option<String>,
    pub reff_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserHistoryQuery {
    pub user_id: i64,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BotHistoryQuery {
    pub bot_id: i64,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

// ============================================================================
// Stats Requests
// ============================================================================

/// Inclusive window; RFC 3339 timestamps or `YYYY-MM-DD` dates
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RevenueDateQuery {
    #[validate(length(min = 1, message = "start is required"))]
    pub start: String,

    #[validate(length(min = 1, message = "end is required"))]
    pub end: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OptionalBotQuery {
    pub bot_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdQuery {
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,
}
