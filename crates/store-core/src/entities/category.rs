//! Category entity - a named, ordered grouping of product ids for display

/// Category (product view) owned by a bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub bot_id: i64,
    pub name: String,
    pub product_ids: Vec<String>,
}

impl Category {
    pub fn new(bot_id: i64, name: String, product_ids: Vec<String>) -> Self {
        Self {
            bot_id,
            name,
            product_ids,
        }
    }

    /// Append product ids, keeping existing order
    pub fn append(&mut self, product_ids: impl IntoIterator<Item = String>) {
        self.product_ids.extend(product_ids);
    }
}
