//! Stats handlers
//!
//! Dashboards read the bot counters. Every other figure here is reduced
//! from completed transactions.

use axum::extract::State;
use store_service::dto::{
    AdminStatsResponse, BotIdQuery, BotTotalsResponse, OptionalBotQuery, ProductIdQuery,
    ProductSalesResponse, PublicStatsResponse, RevenueDateQuery,
};
use store_service::StatsService;

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/stats/admin?botId
pub async fn admin(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BotIdQuery>,
) -> ApiResult<ApiJson<AdminStatsResponse>> {
    let stats = StatsService::new(state.service_context())
        .admin(query.bot_id)
        .await?;
    Ok(ApiJson::ok(stats))
}

/// GET /api/stats/public?botId
pub async fn public(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BotIdQuery>,
) -> ApiResult<ApiJson<PublicStatsResponse>> {
    let stats = StatsService::new(state.service_context())
        .public(query.bot_id)
        .await?;
    Ok(ApiJson::ok(stats))
}

/// GET /api/stats/total-transaction?botId
pub async fn bot_totals(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BotIdQuery>,
) -> ApiResult<ApiJson<BotTotalsResponse>> {
    let totals = StatsService::new(state.service_context())
        .bot_totals(query.bot_id)
        .await?;
    Ok(ApiJson::ok(totals))
}

/// GET /api/stats/revenue
pub async fn revenue(State(state): State<AppState>) -> ApiResult<ApiJson<i64>> {
    let revenue = StatsService::new(state.service_context())
        .total_revenue()
        .await?;
    Ok(ApiJson::ok(revenue))
}

/// GET /api/stats/revenue-date?start&end
pub async fn revenue_between(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RevenueDateQuery>,
) -> ApiResult<ApiJson<i64>> {
    let revenue = StatsService::new(state.service_context())
        .revenue_between(query)
        .await?;
    Ok(ApiJson::ok(revenue))
}

/// GET /api/stats/total-pcs
pub async fn total_units(State(state): State<AppState>) -> ApiResult<ApiJson<i64>> {
    let units = StatsService::new(state.service_context())
        .total_units()
        .await?;
    Ok(ApiJson::ok(units))
}

/// GET /api/stats/pcs-per-product[?botId]
pub async fn units_per_product(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<OptionalBotQuery>,
) -> ApiResult<ApiJson<Vec<ProductSalesResponse>>> {
    let sales = StatsService::new(state.service_context())
        .units_per_product(query.bot_id)
        .await?;
    Ok(ApiJson::ok(sales))
}

/// GET /api/stats/pcs-sold-product?productId
pub async fn units_for_product(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProductIdQuery>,
) -> ApiResult<ApiJson<i64>> {
    let units = StatsService::new(state.service_context())
        .units_for_product(&query.product_id)
        .await?;
    Ok(ApiJson::ok(units))
}
