//! Stats service
//!
//! Bot dashboards and reductions over completed transactions.

use chrono::{DateTime, NaiveDate, Utc};
use store_core::entities::{AdminStats, BotTotals, DateRange, PublicStats};
use tracing::instrument;

use crate::dto::{
    AdminStatsResponse, BotTotalsResponse, ProductSalesResponse, PublicStatsResponse,
    RevenueDateQuery,
};

use super::bot::require_bot;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date.
///
/// A bare date is the start of that day, or its last millisecond when it
/// closes a range.
fn parse_instant(field: &str, raw: &str, end_of_day: bool) -> ServiceResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ServiceError::validation(format!("{field} must be an RFC 3339 timestamp or YYYY-MM-DD"))
    })?;
    let at = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    at.map(|naive| naive.and_utc())
        .ok_or_else(|| ServiceError::validation(format!("{field} is out of range")))
}

/// Stats service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admin dashboard for one bot
    #[instrument(skip(self))]
    pub async fn admin(&self, bot_id: i64) -> ServiceResult<AdminStatsResponse> {
        let bot = require_bot(self.ctx, bot_id).await?;

        let stats = AdminStats {
            total_users: self.ctx.user_repo().count().await?,
            total_transactions: self.ctx.transaction_repo().count_by_bot(bot_id).await?,
            total_products: self.ctx.product_repo().count_by_bot(bot_id).await?,
            total_revenue: bot.revenue,
            total_products_sold: bot.sold,
        };
        Ok(AdminStatsResponse::from(stats))
    }

    /// Public dashboard for one bot
    #[instrument(skip(self))]
    pub async fn public(&self, bot_id: i64) -> ServiceResult<PublicStatsResponse> {
        let bot = require_bot(self.ctx, bot_id).await?;

        Ok(PublicStatsResponse::from(PublicStats {
            total_revenue: bot.revenue,
            total_products_sold: bot.sold,
        }))
    }

    /// Units and revenue of one bot, summed from its per-product groups
    #[instrument(skip(self))]
    pub async fn bot_totals(&self, bot_id: i64) -> ServiceResult<BotTotalsResponse> {
        let sales = self.ctx.stats_repo().sales_per_product(Some(bot_id)).await?;
        Ok(BotTotalsResponse::from(BotTotals::from_sales(&sales)))
    }

    #[instrument(skip(self))]
    pub async fn total_revenue(&self) -> ServiceResult<i64> {
        Ok(self.ctx.stats_repo().total_revenue().await?)
    }

    /// Revenue inside the inclusive `[start, end]` window
    #[instrument(skip(self))]
    pub async fn revenue_between(&self, request: RevenueDateQuery) -> ServiceResult<i64> {
        let start = parse_instant("start", &request.start, false)?;
        let end = parse_instant("end", &request.end, true)?;
        let range = DateRange::new(start, end)?;

        Ok(self.ctx.stats_repo().revenue_between(range).await?)
    }

    #[instrument(skip(self))]
    pub async fn total_units(&self) -> ServiceResult<i64> {
        Ok(self.ctx.stats_repo().total_units().await?)
    }

    /// Units and revenue per product, most units first
    #[instrument(skip(self))]
    pub async fn units_per_product(&self, bot_id: Option<i64>) -> ServiceResult<Vec<ProductSalesResponse>> {
        let sales = self.ctx.stats_repo().sales_per_product(bot_id).await?;
        Ok(sales.into_iter().map(ProductSalesResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn units_for_product(&self, product_id: &str) -> ServiceResult<i64> {
        Ok(self.ctx.stats_repo().units_for_product(product_id).await?)
    }
}
