//! # Storage Module
//!
//! Handles all data persistence for the product catalog.
//!
//! The storage layer is split in two:
//!
//! - **Store** ([`traits::ProductStore`]): a thin pass-through to the relational
//!   engine offering ordered reads and atomic application of a [`ChangeSet`].
//! - **Repository** ([`repositories::ProductRepository`]): domain query methods,
//!   staging of writes and cascade sequencing, scoped to a single request.
//!
//! Writes are never durable until the repository's `save` hands the staged
//! change set to the store.

pub mod change_set;
pub mod repositories;
pub mod sqlite;
pub mod traits;

// Re-export the main types that other modules need
pub use change_set::{ChangeSet, PendingChange};
pub use repositories::{ProductRepository, StagingProductRepository};
pub use sqlite::{DbConnection, SqliteProductStore};
pub use traits::ProductStore;
