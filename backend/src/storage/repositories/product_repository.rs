//! # Product Repository
//!
//! Request-scoped unit of work over a [`ProductStore`].
//!
//! Reads go straight to the store and report a missing entity as `None`.
//! Writes are only staged; [`ProductRepository::save`] applies everything staged
//! since the last save as one atomic batch and reports whether any row changed.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::models::{Product, ProductOption};
use crate::storage::change_set::{ChangeSet, PendingChange};
use crate::storage::traits::ProductStore;

/// Data access contract used by the product service
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by name, or `None` if the store has no result set
    async fn get_all_products(&self) -> Result<Option<Vec<Product>>>;

    /// Products whose name contains `name` (case-insensitive), ordered by name
    async fn find_products_by_name(&self, name: &str) -> Result<Option<Vec<Product>>>;

    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    fn add_product(&mut self, product: Product);

    fn update_product(&mut self, product: Product);

    /// Stage removal of the product's options followed by the product itself
    async fn remove_product(&mut self, product: &Product) -> Result<()>;

    async fn find_options_by_product_id(&self, product_id: Uuid) -> Result<Vec<ProductOption>>;

    async fn find_option_by_product_id_and_option_id(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> Result<Option<ProductOption>>;

    fn add_product_option(&mut self, option: ProductOption);

    fn update_product_option(&mut self, option: ProductOption);

    fn remove_product_option(&mut self, option: &ProductOption);

    /// Commit every staged change. Returns true if at least one row changed.
    async fn save(&mut self) -> Result<bool>;
}

/// Repository that stages writes in a [`ChangeSet`] until `save`
pub struct StagingProductRepository {
    store: Arc<dyn ProductStore>,
    pending: ChangeSet,
}

impl StagingProductRepository {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            pending: ChangeSet::new(),
        }
    }

    /// Changes staged since the last save
    pub fn pending(&self) -> &ChangeSet {
        &self.pending
    }
}

#[async_trait]
impl ProductRepository for StagingProductRepository {
    async fn get_all_products(&self) -> Result<Option<Vec<Product>>> {
        let products = self.store.list_products(None).await?;
        Ok(Some(products))
    }

    async fn find_products_by_name(&self, name: &str) -> Result<Option<Vec<Product>>> {
        let products = self.store.list_products(Some(name)).await?;
        Ok(Some(products))
    }

    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        self.store.get_product(id).await
    }

    fn add_product(&mut self, product: Product) {
        self.pending.push(PendingChange::AddProduct(product));
    }

    fn update_product(&mut self, product: Product) {
        self.pending.push(PendingChange::UpdateProduct(product));
    }

    async fn remove_product(&mut self, product: &Product) -> Result<()> {
        let options = self.store.list_product_options(product.id).await?;
        debug!("Staging removal of {} options for product {}", options.len(), product.id);

        for option in &options {
            self.remove_product_option(option);
        }
        self.pending.push(PendingChange::RemoveProduct { id: product.id });

        Ok(())
    }

    async fn find_options_by_product_id(&self, product_id: Uuid) -> Result<Vec<ProductOption>> {
        self.store.list_product_options(product_id).await
    }

    async fn find_option_by_product_id_and_option_id(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> Result<Option<ProductOption>> {
        self.store.get_product_option(product_id, option_id).await
    }

    fn add_product_option(&mut self, option: ProductOption) {
        self.pending.push(PendingChange::AddOption(option));
    }

    fn update_product_option(&mut self, option: ProductOption) {
        self.pending.push(PendingChange::UpdateOption(option));
    }

    fn remove_product_option(&mut self, option: &ProductOption) {
        self.pending.push(PendingChange::RemoveOption {
            product_id: option.product_id,
            id: option.id,
        });
    }

    async fn save(&mut self) -> Result<bool> {
        let changes = self.pending.take();
        let staged = changes.len();

        let rows_changed = self.store.apply(changes).await?;
        info!("Saved {} staged changes, {} rows changed", staged, rows_changed);

        Ok(rows_changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{DbConnection, SqliteProductStore};
    use rust_decimal::Decimal;

    async fn create_test_repository() -> StagingProductRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        StagingProductRepository::new(Arc::new(SqliteProductStore::new(db)))
    }

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: Decimal::new(10, 0),
            delivery_price: Decimal::new(5, 0),
        }
    }

    fn option(product_id: Uuid, name: &str) -> ProductOption {
        ProductOption {
            id: Uuid::new_v4(),
            product_id,
            name: name.to_string(),
            description: Some("colour".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_is_not_visible_until_save() {
        let mut repo = create_test_repository().await;
        let widget = product("Widget");

        repo.add_product(widget.clone());
        assert!(repo.find_product_by_id(widget.id).await.unwrap().is_none());
        assert_eq!(repo.pending().len(), 1);

        assert!(repo.save().await.unwrap());
        assert!(repo.pending().is_empty());
        assert_eq!(repo.find_product_by_id(widget.id).await.unwrap(), Some(widget));
    }

    #[tokio::test]
    async fn test_save_with_nothing_staged_reports_failure() {
        let mut repo = create_test_repository().await;
        assert!(!repo.save().await.unwrap());
    }

    #[tokio::test]
    async fn test_list_queries_return_present_result_sets() {
        let mut repo = create_test_repository().await;

        assert_eq!(repo.get_all_products().await.unwrap(), Some(vec![]));
        assert_eq!(repo.find_products_by_name("zzz").await.unwrap(), Some(vec![]));

        repo.add_product(product("b-widget"));
        repo.add_product(product("A-Widget"));
        repo.add_product(product("gadget"));
        repo.save().await.unwrap();

        let names: Vec<String> = repo
            .find_products_by_name("WIDGET")
            .await
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A-Widget", "b-widget"]);
        assert_eq!(repo.get_all_products().await.unwrap().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_remove_product_cascades_to_options() {
        let mut repo = create_test_repository().await;
        let phone = product("Phone");
        let other = product("Other");
        let other_option = option(other.id, "Blue");
        repo.add_product(phone.clone());
        repo.add_product(other.clone());
        repo.add_product_option(option(phone.id, "Gold"));
        repo.add_product_option(option(phone.id, "Black"));
        repo.add_product_option(other_option.clone());
        assert!(repo.save().await.unwrap());

        repo.remove_product(&phone).await.unwrap();
        let staged = repo.pending().changes().to_vec();
        assert_eq!(staged.len(), 3);
        assert!(matches!(staged[0], PendingChange::RemoveOption { .. }));
        assert!(matches!(staged[1], PendingChange::RemoveOption { .. }));
        assert_eq!(staged[2], PendingChange::RemoveProduct { id: phone.id });

        assert!(repo.save().await.unwrap());
        assert!(repo.find_product_by_id(phone.id).await.unwrap().is_none());
        assert!(repo.find_options_by_product_id(phone.id).await.unwrap().is_empty());
        assert_eq!(repo.find_options_by_product_id(other.id).await.unwrap(), vec![other_option]);
    }

    #[tokio::test]
    async fn test_update_and_remove_option() {
        let mut repo = create_test_repository().await;
        let phone = product("Phone");
        let mut gold = option(phone.id, "Gold");
        repo.add_product(phone.clone());
        repo.add_product_option(gold.clone());
        repo.save().await.unwrap();

        gold.name = "Rose Gold".to_string();
        gold.description = None;
        repo.update_product_option(gold.clone());
        assert!(repo.save().await.unwrap());
        assert_eq!(
            repo.find_option_by_product_id_and_option_id(phone.id, gold.id).await.unwrap(),
            Some(gold.clone())
        );

        repo.remove_product_option(&gold);
        assert!(repo.save().await.unwrap());
        assert!(repo
            .find_option_by_product_id_and_option_id(phone.id, gold.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_failed_save_clears_staged_changes() {
        let mut repo = create_test_repository().await;
        let mut invalid = product("Invalid");
        invalid.name = "x".repeat(101);

        repo.add_product(invalid);
        assert!(repo.save().await.is_err());
        assert!(repo.pending().is_empty());
    }
}
