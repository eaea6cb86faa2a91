//! Domain model for an option belonging to a product.
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductOption {
    pub id: Uuid,
    /// Owning product; never changes after creation
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}
