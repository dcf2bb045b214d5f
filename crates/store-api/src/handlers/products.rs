//! Product handlers
//!
//! Catalog edits and the account pool behind each product.

use axum::extract::State;
use store_service::dto::{
    AccountQuery, AddProductQuery, AddSoldQuery, AddStockQuery, BotIdQuery, EditDescQuery,
    EditIdQuery, EditNameQuery, EditPriceQuery, EditSnkQuery, ProductQuery, ProductResponse,
    ProductSummaryResponse, StockResponse,
};
use store_service::{ProductEdit, ProductService};

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/product/list?botId
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BotIdQuery>,
) -> ApiResult<ApiJson<Vec<ProductSummaryResponse>>> {
    let products = ProductService::new(state.service_context())
        .list(query.bot_id)
        .await?;
    Ok(ApiJson::ok(products))
}

/// GET /api/product/detail?botId&productId
pub async fn detail(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> ApiResult<ApiJson<ProductResponse>> {
    let product = ProductService::new(state.service_context())
        .detail(query.bot_id, &query.product_id)
        .await?;
    Ok(ApiJson::ok(product))
}

/// GET /api/product/add?botId&productData
///
/// `productData` is a JSON object: `{"id","name","price","desc","snk"}`.
pub async fn add(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AddProductQuery>,
) -> ApiResult<Created<ApiJson<ProductResponse>>> {
    let product = ProductService::new(state.service_context()).add(query).await?;
    Ok(Created(ApiJson::ok(product)))
}

/// GET /api/product/delete?botId&productId
pub async fn delete(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> ApiResult<ApiJson<()>> {
    ProductService::new(state.service_context())
        .delete(query.bot_id, &query.product_id)
        .await?;
    Ok(ApiJson::ok(()).with_message("Product deleted"))
}

/// GET /api/product/edit/name?botId&productId&newName
pub async fn edit_name(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EditNameQuery>,
) -> ApiResult<ApiJson<ProductResponse>> {
    let product = ProductService::new(state.service_context())
        .edit(query.bot_id, &query.product_id, ProductEdit::Name(query.new_name))
        .await?;
    Ok(ApiJson::ok(product))
}

/// GET /api/product/edit/price?botId&productId&newPrice
pub async fn edit_price(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EditPriceQuery>,
) -> ApiResult<ApiJson<ProductResponse>> {
    let product = ProductService::new(state.service_context())
        .edit(query.bot_id, &query.product_id, ProductEdit::Price(query.new_price))
        .await?;
    Ok(ApiJson::ok(product))
}

/// GET /api/product/edit/desc?botId&productId&newDesc
pub async fn edit_desc(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EditDescQuery>,
) -> ApiResult<ApiJson<ProductResponse>> {
    let product = ProductService::new(state.service_context())
        .edit(
            query.bot_id,
            &query.product_id,
            ProductEdit::Description(query.new_desc),
        )
        .await?;
    Ok(ApiJson::ok(product))
}

/// GET /api/product/edit/snk?botId&productId&newSnk
pub async fn edit_snk(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EditSnkQuery>,
) -> ApiResult<ApiJson<ProductResponse>> {
    let product = ProductService::new(state.service_context())
        .edit(query.bot_id, &query.product_id, ProductEdit::Terms(query.new_snk))
        .await?;
    Ok(ApiJson::ok(product))
}

/// GET /api/product/edit/id?botId&oldId&newId
pub async fn edit_id(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EditIdQuery>,
) -> ApiResult<ApiJson<ProductResponse>> {
    let product = ProductService::new(state.service_context())
        .change_id(query.bot_id, &query.old_id, &query.new_id)
        .await?;
    Ok(ApiJson::ok(product))
}

/// GET /api/product/stock/add?botId&productId&accounts
pub async fn add_stock(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AddStockQuery>,
) -> ApiResult<ApiJson<StockResponse>> {
    let stock = ProductService::new(state.service_context())
        .add_stock(query)
        .await?;
    Ok(ApiJson::ok(stock))
}

/// GET /api/product/account?botId&productId&total
///
/// Returns up to `total` accounts from the head of the pool without
/// removing them.
pub async fn peek_accounts(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AccountQuery>,
) -> ApiResult<ApiJson<Vec<String>>> {
    let accounts = ProductService::new(state.service_context())
        .peek_accounts(query)
        .await?;
    Ok(ApiJson::ok(accounts))
}

/// GET /api/product/take?botId&productId&total
///
/// All or nothing: a short pool is a 422 and stays untouched.
pub async fn take_accounts(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AccountQuery>,
) -> ApiResult<ApiJson<Vec<String>>> {
    let accounts = ProductService::new(state.service_context())
        .take_accounts(query)
        .await?;
    Ok(ApiJson::ok(accounts))
}

/// GET /api/product/sold/add?botId&productId&totalTerjual
pub async fn add_sold(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AddSoldQuery>,
) -> ApiResult<ApiJson<ProductResponse>> {
    let product = ProductService::new(state.service_context())
        .add_sold(query)
        .await?;
    Ok(ApiJson::ok(product))
}
