//! Transaction handlers

use axum::extract::State;
use store_service::dto::{
    AddHistoryQuery, BotHistoryQuery, BotIdQuery, BotResponse, PurchaseQuery, PurchaseResponse,
    RecordSaleQuery, TransactionResponse, UserHistoryQuery,
};
use store_service::TransactionService;

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/transaction/record-sale?botId&productCode&quantity&finalPrice
///
/// An unknown product code still counts on the bot.
pub async fn record_sale(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RecordSaleQuery>,
) -> ApiResult<ApiJson<BotResponse>> {
    let bot = TransactionService::new(state.service_context())
        .record_sale(query)
        .await?;
    Ok(ApiJson::ok(bot).with_message("Sale recorded successfully"))
}

/// GET /api/transaction/add-history?userId&botId&productId&productName&quantity&price&...
pub async fn add_history(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AddHistoryQuery>,
) -> ApiResult<Created<ApiJson<TransactionResponse>>> {
    let transaction = TransactionService::new(state.service_context())
        .add_history(query)
        .await?;
    Ok(Created(ApiJson::ok(transaction)))
}

/// GET /api/transaction/purchase?botId&userId&productId&quantity&paymentMethod&reffId
pub async fn purchase(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PurchaseQuery>,
) -> ApiResult<Created<ApiJson<PurchaseResponse>>> {
    let receipt = TransactionService::new(state.service_context())
        .purchase(query)
        .await?;
    Ok(Created(ApiJson::ok(receipt)))
}

/// GET /api/transaction/user-history?userId&limit&skip
pub async fn user_history(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<UserHistoryQuery>,
) -> ApiResult<ApiJson<Vec<TransactionResponse>>> {
    let history = TransactionService::new(state.service_context())
        .user_history(query)
        .await?;
    Ok(ApiJson::ok(history))
}

/// GET /api/transaction/bot-history?botId&limit&skip
pub async fn bot_history(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BotHistoryQuery>,
) -> ApiResult<ApiJson<Vec<TransactionResponse>>> {
    let history = TransactionService::new(state.service_context())
        .bot_history(query)
        .await?;
    Ok(ApiJson::ok(history))
}

/// GET /api/transaction/all?botId
pub async fn latest_for_bot(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BotIdQuery>,
) -> ApiResult<ApiJson<Vec<TransactionResponse>>> {
    let history = TransactionService::new(state.service_context())
        .latest_for_bot(query.bot_id)
        .await?;
    Ok(ApiJson::ok(history))
}
