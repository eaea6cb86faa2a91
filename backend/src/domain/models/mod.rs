pub mod product;
pub mod product_option;

pub use product::Product;
pub use product_option::ProductOption;
