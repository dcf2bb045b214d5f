//! Route definitions
//!
//! Every storefront operation is a GET under `/api`, grouped by domain.

use axum::{routing::get, Router};

use crate::handlers::{bots, categories, health, products, stats, transactions, users};
use crate::state::AppState;

/// Create the API router (health routes are separate so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Banner and health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(bot_routes())
        .merge(category_routes())
        .merge(product_routes())
        .merge(transaction_routes())
        .merge(stats_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/register", get(users::register))
        .route("/user/check", get(users::check))
        .route("/user/detail", get(users::detail))
        .route("/user/edit-balance", get(users::edit_balance))
        .route("/user/edit-role", get(users::edit_role))
        .route("/user/ban", get(users::ban))
        .route("/user/all", get(users::list_all))
        .route("/user/delete", get(users::delete))
        .route("/user/telegram", get(users::telegram))
        .route("/user/add-transaction", get(users::add_transaction))
}

/// Bot routes
fn bot_routes() -> Router<AppState> {
    Router::new()
        .route("/bot/check", get(bots::check))
        .route("/bot/create", get(bots::create))
        .route("/bot/detail", get(bots::detail))
        .route("/bot/reset-today", get(bots::reset_today))
}

/// Category routes, including product views
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/category/list", get(categories::list))
        .route("/category/add", get(categories::add))
        .route("/category/update", get(categories::update))
        .route("/category/delete", get(categories::delete))
        .route("/product/view/create", get(categories::create_view))
        .route("/product/view/add", get(categories::add_to_view))
}

/// Product and inventory routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/product/list", get(products::list))
        .route("/product/detail", get(products::detail))
        .route("/product/add", get(products::add))
        .route("/product/delete", get(products::delete))
        // Single-field edits
        .route("/product/edit/name", get(products::edit_name))
        .route("/product/edit/price", get(products::edit_price))
        .route("/product/edit/desc", get(products::edit_desc))
        .route("/product/edit/snk", get(products::edit_snk))
        .route("/product/edit/id", get(products::edit_id))
        // Account pool
        .route("/product/stock/add", get(products::add_stock))
        .route("/product/account", get(products::peek_accounts))
        .route("/product/take", get(products::take_accounts))
        .route("/product/sold/add", get(products::add_sold))
}

/// Transaction routes
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transaction/record-sale", get(transactions::record_sale))
        .route("/transaction/add-history", get(transactions::add_history))
        .route("/transaction/purchase", get(transactions::purchase))
        .route("/transaction/user-history", get(transactions::user_history))
        .route("/transaction/bot-history", get(transactions::bot_history))
        .route("/transaction/all", get(transactions::latest_for_bot))
}

/// Stats routes
fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/admin", get(stats::admin))
        .route("/stats/public", get(stats::public))
        .route("/stats/total-transaction", get(stats::bot_totals))
        .route("/stats/add-bot-trx", get(bots::add_transaction))
        .route("/stats/revenue", get(stats::revenue))
        .route("/stats/revenue-date", get(stats::revenue_between))
        .route("/stats/total-pcs", get(stats::total_units))
        .route("/stats/pcs-per-product", get(stats::units_per_product))
        .route("/stats/pcs-sold-product", get(stats::units_for_product))
}
