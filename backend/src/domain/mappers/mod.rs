pub mod product_mapper;
pub mod product_option_mapper;

pub use product_mapper::ProductMapper;
pub use product_option_mapper::ProductOptionMapper;
