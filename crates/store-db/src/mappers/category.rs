//! Category entity <-> model mapper

use store_core::entities::Category;

use crate::models::CategoryModel;

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            bot_id: model.bot_id,
            name: model.name,
            product_ids: model.product_ids,
        }
    }
}
