//! Product entity <-> model mapper

use std::collections::HashMap;

use store_core::entities::{Product, ProductSummary};

use crate::models::{ProductAccountModel, ProductModel, ProductSummaryModel};

/// Convert ProductModel to Product entity
/// Note: the pool is loaded separately, see `product_with_accounts`
impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        product_with_accounts(model, Vec::new())
    }
}

/// Convert ProductModel with its pool (in seq order) to Product entity
pub fn product_with_accounts(model: ProductModel, accounts: Vec<String>) -> Product {
    Product {
        bot_id: model.bot_id,
        id: model.id,
        name: model.name,
        price: model.price,
        description: model.description,
        terms: model.terms,
        sold: model.sold,
        accounts,
    }
}

/// Group pool rows by product id, keeping seq order within each group
pub fn group_accounts(mut rows: Vec<ProductAccountModel>) -> HashMap<String, Vec<String>> {
    rows.sort_by_key(|row| row.seq);
    let mut pools: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        pools.entry(row.product_id).or_default().push(row.account);
    }
    pools
}

impl From<ProductSummaryModel> for ProductSummary {
    fn from(model: ProductSummaryModel) -> Self {
        ProductSummary {
            id: model.id,
            name: model.name,
            price: model.price,
            description: model.description,
            terms: model.terms,
            stock: model.stock,
            sold: model.sold,
        }
    }
}
