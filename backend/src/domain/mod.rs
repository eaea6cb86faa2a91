//! # Domain Module
//!
//! Business rules for the product catalog.
//!
//! ## Module Organization
//!
//! - **models**: `Product` and `ProductOption` entities
//! - **mappers**: explicit conversions between entities and the wire DTOs
//! - **errors**: the failure outcomes a request can end in
//! - **product_service**: request validation and repository orchestration
//!
//! ## Business Rules
//!
//! - Identifiers arrive as raw strings and must parse as UUIDs
//! - Names are required and at most 100 characters, descriptions at most 500
//! - Prices are non-negative decimals
//! - Options are only created under an existing product
//! - Deleting a product deletes its options in the same commit

pub mod errors;
pub mod mappers;
pub mod models;
pub mod product_service;

pub use errors::{ProductError, ProductResult};
pub use product_service::ProductService;
