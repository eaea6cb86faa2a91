//! Mapping between product entities and the shared wire DTOs.

use shared::{ProductDto, ProductForCreationDto, ProductForUpdateDto, ProductsDto};
use uuid::Uuid;

use crate::domain::models::Product;

/// Mapper to convert between shared product DTOs and domain Product models.
pub struct ProductMapper;

impl ProductMapper {
    /// Converts a domain Product to its output DTO.
    pub fn to_dto(domain: Product) -> ProductDto {
        ProductDto {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            price: domain.price,
            delivery_price: domain.delivery_price,
        }
    }

    pub fn to_list_dto(products: Vec<Product>) -> ProductsDto {
        ProductsDto {
            items: products.into_iter().map(Self::to_dto).collect(),
        }
    }

    /// Builds a new entity from a creation payload with the given identifier.
    pub fn from_creation(id: Uuid, dto: ProductForCreationDto) -> Product {
        Product {
            id,
            name: dto.name,
            description: dto.description,
            price: dto.price,
            delivery_price: dto.delivery_price,
        }
    }

    /// Overwrites every mutable field of `product`; the id is left untouched.
    pub fn apply_update(dto: ProductForUpdateDto, product: &mut Product) {
        product.name = dto.name;
        product.description = dto.description;
        product.price = dto.price;
        product.delivery_price = dto.delivery_price;
    }
}
