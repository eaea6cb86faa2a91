use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub delivery_price: Decimal,
}

/// Envelope for product listings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductsDto {
    pub items: Vec<ProductDto>,
}

/// Payload for POST /api/products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForCreationDto {
    /// Required, 1..=100 characters
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub delivery_price: Decimal,
}

/// Payload for PUT /api/products/{id}
///
/// Every field overwrites the stored value, absent ones included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForUpdateDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub delivery_price: Decimal,
}

/// A product option as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Envelope for option listings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductOptionsDto {
    pub items: Vec<ProductOptionDto>,
}

/// Payload for POST /api/products/{id}/options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionForCreationDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

/// Payload for PUT /api/products/{id}/options/{optionId}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionForUpdateDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required and cannot exceed 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Value cannot be negative".into());
        return Err(error);
    }
    Ok(())
}
