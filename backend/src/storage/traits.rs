//! # Storage Traits
//!
//! This module defines the storage abstraction the repository layer is
//! written against, so the SQLite backend can be swapped or faked in tests.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::{Product, ProductOption};
use crate::storage::change_set::ChangeSet;

/// Trait defining the interface for product persistence
///
/// Reads go straight to the backing store. Writes are never issued one by one;
/// they are collected in a [`ChangeSet`] and applied together.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// List products ordered by name ascending.
    /// With a filter, only names containing it (case-insensitive) are returned.
    async fn list_products(&self, name_filter: Option<&str>) -> Result<Vec<Product>>;

    /// Retrieve a product by ID
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>>;

    /// List the options of a product ordered by name ascending
    async fn list_product_options(&self, product_id: Uuid) -> Result<Vec<ProductOption>>;

    /// Retrieve an option by ID, scoped to its owning product
    async fn get_product_option(&self, product_id: Uuid, option_id: Uuid) -> Result<Option<ProductOption>>;

    /// Apply every change atomically.
    /// Returns the number of rows changed; on error nothing is applied.
    async fn apply(&self, changes: ChangeSet) -> Result<u64>;
}
