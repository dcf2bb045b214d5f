//! Category service
//!
//! Categories (also called product views) group a bot's product ids under a
//! display name. Ids are not checked against the catalog.

use std::collections::BTreeMap;

use store_core::entities::Category;
use store_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CategoryQuery, CategoryResponse, ProductViewQuery, ProductViewResponse};

use super::bot::require_bot;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Map of category name to product ids
    #[instrument(skip(self))]
    pub async fn list(&self, bot_id: i64) -> ServiceResult<BTreeMap<String, Vec<String>>> {
        require_bot(self.ctx, bot_id).await?;

        let categories = self.ctx.category_repo().find_by_bot(bot_id).await?;
        Ok(categories
            .into_iter()
            .map(|c| (c.name, c.product_ids))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn add(&self, request: CategoryQuery) -> ServiceResult<CategoryResponse> {
        let category = Category::new(
            request.bot_id,
            request.category_name,
            request.product_ids.into_inner(),
        );
        self.ctx.category_repo().create(&category).await?;

        info!(bot_id = %category.bot_id, name = %category.name, "Category created");
        Ok(CategoryResponse::from(category))
    }

    /// Replace the product ids of an existing category
    #[instrument(skip(self))]
    pub async fn update(&self, request: CategoryQuery) -> ServiceResult<CategoryResponse> {
        let category = self
            .ctx
            .category_repo()
            .replace(
                request.bot_id,
                &request.category_name,
                &request.product_ids.into_inner(),
            )
            .await?;

        info!(bot_id = %request.bot_id, name = %request.category_name, "Category updated");
        Ok(CategoryResponse::from(category))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, bot_id: i64, name: &str) -> ServiceResult<()> {
        self.ctx.category_repo().delete(bot_id, name).await?;

        info!(bot_id = %bot_id, name, "Category deleted");
        Ok(())
    }

    /// Create an empty product view; an existing one is returned unchanged
    #[instrument(skip(self))]
    pub async fn create_view(&self, bot_id: i64, title: &str) -> ServiceResult<ProductViewResponse> {
        require_bot(self.ctx, bot_id).await?;

        if let Some(existing) = self.ctx.category_repo().find(bot_id, title).await? {
            return Ok(ProductViewResponse {
                exist: true,
                id: existing.product_ids,
            });
        }

        let category = Category::new(bot_id, title.to_string(), Vec::new());
        match self.ctx.category_repo().create(&category).await {
            Ok(()) => {
                info!(bot_id = %bot_id, title, "Product view created");
                Ok(ProductViewResponse {
                    exist: false,
                    id: Vec::new(),
                })
            }
            // Lost a race with a concurrent create
            Err(DomainError::CategoryAlreadyExists(_)) => {
                let existing = self.ctx.category_repo().find(bot_id, title).await?;
                Ok(ProductViewResponse {
                    exist: true,
                    id: existing.map(|c| c.product_ids).unwrap_or_default(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Append product ids to a product view
    #[instrument(skip(self))]
    pub async fn append_view(&self, request: ProductViewQuery) -> ServiceResult<CategoryResponse> {
        require_bot(self.ctx, request.bot_id).await?;

        let category = self
            .ctx
            .category_repo()
            .append(request.bot_id, &request.title, &request.accounts.into_inner())
            .await?;

        info!(bot_id = %request.bot_id, title = %request.title, "Product view extended");
        Ok(CategoryResponse::from(category))
    }
}
