//! Aggregation row mapper

use store_core::entities::ProductSales;

use crate::models::ProductSalesModel;

impl From<ProductSalesModel> for ProductSales {
    fn from(model: ProductSalesModel) -> Self {
        ProductSales {
            product_id: model.product_id,
            product_name: model.product_name,
            total_units: model.total_units,
            total_revenue: model.total_revenue,
        }
    }
}
