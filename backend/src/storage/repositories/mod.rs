// Repository modules
pub mod product_repository;

// Re-export repository types
pub use product_repository::{ProductRepository, StagingProductRepository};
