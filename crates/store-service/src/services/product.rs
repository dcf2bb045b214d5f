//! Product service
//!
//! Catalog management and the inventory pool: add stock, peek and take.

use store_core::entities::{Product, ProductEdit};
use store_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    AccountQuery, AddProductQuery, AddSoldQuery, AddStockQuery, ProductResponse,
    ProductSummaryResponse, StockResponse,
};

use super::bot::require_bot;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Product service
pub struct ProductService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProductService<'a> {
    /// Create a new ProductService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn require_product(&self, bot_id: i64, product_id: &str) -> ServiceResult<Product> {
        if let Some(product) = self.ctx.product_repo().find(bot_id, product_id).await? {
            return Ok(product);
        }
        require_bot(self.ctx, bot_id).await?;
        Err(DomainError::ProductNotFound {
            bot_id,
            product_id: product_id.to_string(),
        }
        .into())
    }

    /// A bot's catalog with stock depth per product
    #[instrument(skip(self))]
    pub async fn list(&self, bot_id: i64) -> ServiceResult<Vec<ProductSummaryResponse>> {
        require_bot(self.ctx, bot_id).await?;

        let products = self.ctx.product_repo().find_by_bot(bot_id).await?;
        Ok(products.into_iter().map(ProductSummaryResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn detail(&self, bot_id: i64, product_id: &str) -> ServiceResult<ProductResponse> {
        let product = self.require_product(bot_id, product_id).await?;
        Ok(ProductResponse::from(product))
    }

    /// Add a product with an empty pool
    #[instrument(skip(self))]
    pub async fn add(&self, request: AddProductQuery) -> ServiceResult<ProductResponse> {
        let data = request.product_data;
        let mut product = Product::new(request.bot_id, data.id, data.name, data.price);
        product.description = data.desc;
        product.terms = data.snk;

        self.ctx.product_repo().create(&product).await?;

        info!(bot_id = %product.bot_id, product_id = %product.id, "Product added");
        Ok(ProductResponse::from(product))
    }

    /// Delete a product and its pool; history keeps its copies
    #[instrument(skip(self))]
    pub async fn delete(&self, bot_id: i64, product_id: &str) -> ServiceResult<()> {
        self.ctx.product_repo().delete(bot_id, product_id).await?;

        info!(bot_id = %bot_id, product_id, "Product deleted");
        Ok(())
    }

    /// Change one descriptive field
    #[instrument(skip(self))]
    pub async fn edit(
        &self,
        bot_id: i64,
        product_id: &str,
        edit: ProductEdit,
    ) -> ServiceResult<ProductResponse> {
        let product = self
            .ctx
            .product_repo()
            .update_field(bot_id, product_id, edit)
            .await?;

        info!(bot_id = %bot_id, product_id, "Product edited");
        Ok(ProductResponse::from(product))
    }

    /// Rename a product id; its pool and category memberships follow
    #[instrument(skip(self))]
    pub async fn change_id(
        &self,
        bot_id: i64,
        old_id: &str,
        new_id: &str,
    ) -> ServiceResult<ProductResponse> {
        if old_id == new_id {
            return self.detail(bot_id, old_id).await;
        }
        let product = self.ctx.product_repo().change_id(bot_id, old_id, new_id).await?;
        Ok(ProductResponse::from(product))
    }

    /// Append accounts to the end of the pool
    #[instrument(skip(self, request), fields(bot_id = %request.bot_id, product_id = %request.product_id))]
    pub async fn add_stock(&self, request: AddStockQuery) -> ServiceResult<StockResponse> {
        if request.accounts.is_empty() {
            return Err(ServiceError::validation("accounts must not be empty"));
        }
        let accounts = request.accounts.into_inner();

        let stock = self
            .ctx
            .product_repo()
            .add_accounts(request.bot_id, &request.product_id, &accounts)
            .await?;

        info!(added = accounts.len(), stock, "Stock added");
        Ok(StockResponse {
            product_id: request.product_id,
            stock,
        })
    }

    /// The first `total` accounts, left in the pool
    #[instrument(skip(self))]
    pub async fn peek_accounts(&self, request: AccountQuery) -> ServiceResult<Vec<String>> {
        Ok(self
            .ctx
            .product_repo()
            .peek_accounts(request.bot_id, &request.product_id, request.total)
            .await?)
    }

    /// Remove and return the first `total` accounts
    #[instrument(skip(self))]
    pub async fn take_accounts(&self, request: AccountQuery) -> ServiceResult<Vec<String>> {
        Ok(self
            .ctx
            .product_repo()
            .take_accounts(request.bot_id, &request.product_id, request.total)
            .await?)
    }

    /// Increment the product and bot sold counters
    #[instrument(skip(self))]
    pub async fn add_sold(&self, request: AddSoldQuery) -> ServiceResult<ProductResponse> {
        let product = self
            .ctx
            .product_repo()
            .add_sold(request.bot_id, &request.product_id, request.total_terjual)
            .await?;
        Ok(ProductResponse::from(product))
    }
}
