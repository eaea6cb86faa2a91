//! # SQLite Storage Module
//!
//! SQLite-based implementation of [`ProductStore`](crate::storage::traits::ProductStore).
//!
//! ## Components
//!
//! - **connection.rs** - pool creation and schema setup
//! - **product_store.rs** - queries and atomic change-set application

pub mod connection;
pub mod product_store;

pub use connection::DbConnection;
pub use product_store::SqliteProductStore;
