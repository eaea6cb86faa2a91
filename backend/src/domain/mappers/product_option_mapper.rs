//! Mapping between product option entities and the shared wire DTOs.

use shared::{ProductOptionDto, ProductOptionForCreationDto, ProductOptionForUpdateDto, ProductOptionsDto};
use uuid::Uuid;

use crate::domain::models::ProductOption;

pub struct ProductOptionMapper;

impl ProductOptionMapper {
    pub fn to_dto(domain: ProductOption) -> ProductOptionDto {
        ProductOptionDto {
            id: domain.id,
            product_id: domain.product_id,
            name: domain.name,
            description: domain.description,
        }
    }

    pub fn to_list_dto(options: Vec<ProductOption>) -> ProductOptionsDto {
        ProductOptionsDto {
            items: options.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn from_creation(id: Uuid, product_id: Uuid, dto: ProductOptionForCreationDto) -> ProductOption {
        ProductOption {
            id,
            product_id,
            name: dto.name,
            description: dto.description,
        }
    }

    /// Overwrites name and description; id and owning product are left untouched.
    pub fn apply_update(dto: ProductOptionForUpdateDto, option: &mut ProductOption) {
        option.name = dto.name;
        option.description = dto.description;
    }
}
