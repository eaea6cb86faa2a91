use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

/// DbConnection owns the SQLite pool shared by every request
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database at {}", url))?;
        }

        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool).await?;
        info!("Database ready at {}", url);

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a private in-memory database for tests.
    ///
    /// A single connection that never expires keeps the memory database alive
    /// for the lifetime of the pool.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL CHECK (length(name) <= 100),
                description TEXT CHECK (description IS NULL OR length(description) <= 500),
                price TEXT NOT NULL,
                delivery_price TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create products table")?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_products_name
            ON products(name);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS product_options (
                id TEXT PRIMARY KEY NOT NULL,
                product_id TEXT NOT NULL,
                name TEXT NOT NULL CHECK (length(name) <= 100),
                description TEXT CHECK (description IS NULL OR length(description) <= 500)
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create product_options table")?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_product_options_product_id
            ON product_options(product_id, name);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .unwrap();
        let tables: Vec<String> = rows.iter().map(|r| r.get("name")).collect();

        assert!(tables.contains(&"products".to_string()));
        assert!(tables.contains(&"product_options".to_string()));
    }

    #[tokio::test]
    async fn test_file_database_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("products.db").display());

        let db = DbConnection::new(&url).await.expect("Failed to open file database");
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert!(dir.path().join("products.db").exists());
    }

    #[tokio::test]
    async fn test_name_length_enforced_by_schema() {
        let db = DbConnection::init_test().await.unwrap();

        let result = sqlx::query(
            "INSERT INTO products (id, name, price, delivery_price) VALUES (?, ?, '1', '1')",
        )
        .bind("id-1")
        .bind("x".repeat(101))
        .execute(db.pool())
        .await;

        assert!(result.is_err());
    }
}
