use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use crate::domain::models::{Product, ProductOption};
use crate::storage::change_set::{ChangeSet, PendingChange};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::ProductStore;

/// SQLite-backed product store
#[derive(Clone)]
pub struct SqliteProductStore {
    db: DbConnection,
}

impl SqliteProductStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_product(row: &SqliteRow) -> Result<Product> {
        let id: String = row.try_get("id")?;
        let price: String = row.try_get("price")?;
        let delivery_price: String = row.try_get("delivery_price")?;

        Ok(Product {
            id: Uuid::parse_str(&id).with_context(|| format!("Corrupt product id: {}", id))?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: price
                .parse::<Decimal>()
                .with_context(|| format!("Corrupt price for product {}", id))?,
            delivery_price: delivery_price
                .parse::<Decimal>()
                .with_context(|| format!("Corrupt delivery price for product {}", id))?,
        })
    }

    fn row_to_option(row: &SqliteRow) -> Result<ProductOption> {
        let id: String = row.try_get("id")?;
        let product_id: String = row.try_get("product_id")?;

        Ok(ProductOption {
            id: Uuid::parse_str(&id).with_context(|| format!("Corrupt option id: {}", id))?,
            product_id: Uuid::parse_str(&product_id)
                .with_context(|| format!("Corrupt product id on option {}", id))?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn list_products(&self, name_filter: Option<&str>) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, delivery_price
            FROM products
            ORDER BY name COLLATE NOCASE ASC, name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let products = rows
            .iter()
            .map(Self::row_to_product)
            .collect::<Result<Vec<_>>>()?;

        // SQLite's lower() only folds ASCII, so matching happens here
        Ok(match name_filter {
            Some(filter) => {
                let needle = filter.to_lowercase();
                products
                    .into_iter()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => products,
        })
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, delivery_price
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn list_product_options(&self, product_id: Uuid) -> Result<Vec<ProductOption>> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, name, description
            FROM product_options
            WHERE product_id = ?
            ORDER BY name COLLATE NOCASE ASC, name ASC
            "#,
        )
        .bind(product_id.to_string())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_option).collect()
    }

    async fn get_product_option(&self, product_id: Uuid, option_id: Uuid) -> Result<Option<ProductOption>> {
        let row = sqlx::query(
            r#"
            SELECT id, product_id, name, description
            FROM product_options
            WHERE product_id = ? AND id = ?
            "#,
        )
        .bind(product_id.to_string())
        .bind(option_id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_option).transpose()
    }

    async fn apply(&self, changes: ChangeSet) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;
        let mut rows_changed = 0;

        for change in changes {
            let result = match &change {
                PendingChange::AddProduct(product) => {
                    sqlx::query(
                        r#"
                        INSERT INTO products (id, name, description, price, delivery_price)
                        VALUES (?, ?, ?, ?, ?)
                        "#,
                    )
                    .bind(product.id.to_string())
                    .bind(&product.name)
                    .bind(&product.description)
                    .bind(product.price.to_string())
                    .bind(product.delivery_price.to_string())
                    .execute(&mut *tx)
                    .await
                }
                PendingChange::UpdateProduct(product) => {
                    sqlx::query(
                        r#"
                        UPDATE products
                        SET name = ?, description = ?, price = ?, delivery_price = ?
                        WHERE id = ?
                        "#,
                    )
                    .bind(&product.name)
                    .bind(&product.description)
                    .bind(product.price.to_string())
                    .bind(product.delivery_price.to_string())
                    .bind(product.id.to_string())
                    .execute(&mut *tx)
                    .await
                }
                PendingChange::RemoveProduct { id } => {
                    sqlx::query("DELETE FROM products WHERE id = ?")
                        .bind(id.to_string())
                        .execute(&mut *tx)
                        .await
                }
                PendingChange::AddOption(option) => {
                    sqlx::query(
                        r#"
                        INSERT INTO product_options (id, product_id, name, description)
                        VALUES (?, ?, ?, ?)
                        "#,
                    )
                    .bind(option.id.to_string())
                    .bind(option.product_id.to_string())
                    .bind(&option.name)
                    .bind(&option.description)
                    .execute(&mut *tx)
                    .await
                }
                PendingChange::UpdateOption(option) => {
                    sqlx::query(
                        r#"
                        UPDATE product_options
                        SET name = ?, description = ?
                        WHERE product_id = ? AND id = ?
                        "#,
                    )
                    .bind(&option.name)
                    .bind(&option.description)
                    .bind(option.product_id.to_string())
                    .bind(option.id.to_string())
                    .execute(&mut *tx)
                    .await
                }
                PendingChange::RemoveOption { product_id, id } => {
                    sqlx::query("DELETE FROM product_options WHERE product_id = ? AND id = ?")
                        .bind(product_id.to_string())
                        .bind(id.to_string())
                        .execute(&mut *tx)
                        .await
                }
            }
            .with_context(|| format!("Failed to apply {:?}", change))?;

            rows_changed += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit change set")?;
        debug!("Applied change set, {} rows changed", rows_changed);

        Ok(rows_changed)
    }
}
