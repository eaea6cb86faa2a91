//! Domain model for a product.
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub delivery_price: Decimal,
}

impl Product {
    /// Identifying fields used in log lines and 500 diagnostics
    pub fn describe(&self) -> String {
        format!("Product.Id:{} | Product.Name: {}", self.id, self.name)
    }
}
