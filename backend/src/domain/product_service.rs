//! # Product Service
//!
//! Request handling for products and their options: identifier parsing,
//! payload validation, repository orchestration and DTO mapping.
//!
//! A service wraps one request-scoped repository. Every operation validates
//! its input before the repository is touched, and every write ends with a
//! single `save`; a save that changes no rows is reported as
//! [`ProductError::CommitFailed`] with a diagnostic naming the entity.

use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::errors::{ProductError, ProductResult};
use crate::domain::mappers::{ProductMapper, ProductOptionMapper};
use crate::storage::repositories::ProductRepository;
use shared::{
    ProductDto, ProductForCreationDto, ProductForUpdateDto, ProductOptionDto,
    ProductOptionForCreationDto, ProductOptionForUpdateDto, ProductOptionsDto, ProductsDto,
};

/// Service for managing products and product options
pub struct ProductService<R> {
    repository: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService over a request-scoped repository
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// List products, optionally filtered by a case-insensitive name fragment.
    ///
    /// `Some("")` is a filter, not the absence of one.
    pub async fn list_products(&self, name: Option<&str>) -> ProductResult<ProductsDto> {
        let products = match name {
            None => self.repository.get_all_products().await?,
            Some(name) => self.repository.find_products_by_name(name).await?,
        };

        match products {
            Some(products) => {
                info!("Found {} products", products.len());
                Ok(ProductMapper::to_list_dto(products))
            }
            None => {
                warn!("Product with Name {} not found.", name.unwrap_or_default());
                Err(ProductError::NotFound)
            }
        }
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: &str) -> ProductResult<ProductDto> {
        let id = parse_id(id)?;

        let product = self
            .repository
            .find_product_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        Ok(ProductMapper::to_dto(product))
    }

    /// Create a product and return its newly generated ID
    pub async fn create_product(&mut self, payload: Option<ProductForCreationDto>) -> ProductResult<Uuid> {
        let payload = payload.ok_or(ProductError::MissingPayload)?;
        payload.validate()?;

        let product = ProductMapper::from_creation(Uuid::new_v4(), payload);
        info!("Creating product: {}", product.describe());

        let diagnostic = format!("Error when saving new Product. {}", product.describe());
        let id = product.id;
        self.repository.add_product(product);
        self.commit(diagnostic).await?;

        Ok(id)
    }

    /// Overwrite the mutable fields of an existing product
    pub async fn update_product(&mut self, id: &str, payload: Option<ProductForUpdateDto>) -> ProductResult<()> {
        let id = parse_id(id)?;
        let payload = payload.ok_or(ProductError::MissingPayload)?;
        payload.validate()?;

        let mut product = self
            .repository
            .find_product_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        ProductMapper::apply_update(payload, &mut product);

        let diagnostic = format!("Error when updating Product. {}", product.describe());
        self.repository.update_product(product);
        self.commit(diagnostic).await
    }

    /// Delete a product together with all of its options
    pub async fn delete_product(&mut self, id: &str) -> ProductResult<()> {
        let id = parse_id(id)?;

        let product = self
            .repository
            .find_product_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        self.repository.remove_product(&product).await?;
        self.commit(format!("Error when deleting Product. {}", product.describe()))
            .await
    }

    /// List the options of an existing product
    pub async fn list_options(&self, product_id: &str) -> ProductResult<ProductOptionsDto> {
        let product_id = parse_id(product_id)?;

        self.repository
            .find_product_by_id(product_id)
            .await?
            .ok_or(ProductError::NotFound)?;

        let options = self.repository.find_options_by_product_id(product_id).await?;
        Ok(ProductOptionMapper::to_list_dto(options))
    }

    /// Get a single option scoped to its product
    pub async fn get_option(&self, product_id: &str, option_id: &str) -> ProductResult<ProductOptionDto> {
        let product_id = parse_id(product_id)?;
        let option_id = parse_option_id(option_id)?;

        let option = self
            .repository
            .find_option_by_product_id_and_option_id(product_id, option_id)
            .await?
            .ok_or(ProductError::NotFound)?;

        Ok(ProductOptionMapper::to_dto(option))
    }

    /// Create an option under an existing product and return its ID
    pub async fn create_option(
        &mut self,
        product_id: &str,
        payload: Option<ProductOptionForCreationDto>,
    ) -> ProductResult<Uuid> {
        let product_id = parse_id(product_id)?;
        let payload = payload.ok_or(ProductError::MissingPayload)?;
        payload.validate()?;

        let product = self
            .repository
            .find_product_by_id(product_id)
            .await?
            .ok_or(ProductError::NotFound)?;

        let option = ProductOptionMapper::from_creation(Uuid::new_v4(), product.id, payload);
        info!("Creating option {} for product {}", option.name, product.id);

        let diagnostic = format!(
            "Error when creating Product Option. {} | Product.OptionName:{}",
            product.describe(),
            option.name
        );
        let id = option.id;
        self.repository.add_product_option(option);
        self.commit(diagnostic).await?;

        Ok(id)
    }

    /// Overwrite name and description of an existing option
    pub async fn update_option(
        &mut self,
        product_id: &str,
        option_id: &str,
        payload: Option<ProductOptionForUpdateDto>,
    ) -> ProductResult<()> {
        let product_id = parse_id(product_id)?;
        let option_id = parse_option_id(option_id)?;
        let payload = payload.ok_or(ProductError::MissingPayload)?;
        payload.validate()?;

        let product = self
            .repository
            .find_product_by_id(product_id)
            .await?
            .ok_or(ProductError::ProductNotFound)?;

        let mut option = self
            .repository
            .find_option_by_product_id_and_option_id(product_id, option_id)
            .await?
            .ok_or(ProductError::ProductOptionNotFound)?;

        ProductOptionMapper::apply_update(payload, &mut option);

        let diagnostic = format!(
            "Error when updating Product Option. {} | Product.OptionId:{} | Product.OptionName:{}",
            product.describe(),
            option.id,
            option.name
        );
        self.repository.update_product_option(option);
        self.commit(diagnostic).await
    }

    /// Delete a single option of a product
    pub async fn delete_option(&mut self, product_id: &str, option_id: &str) -> ProductResult<()> {
        let product_id = parse_id(product_id)?;
        let option_id = parse_option_id(option_id)?;

        let product = self
            .repository
            .find_product_by_id(product_id)
            .await?
            .ok_or(ProductError::ProductNotFound)?;

        let option = self
            .repository
            .find_option_by_product_id_and_option_id(product_id, option_id)
            .await?
            .ok_or(ProductError::ProductOptionNotFound)?;

        self.repository.remove_product_option(&option);
        self.commit(format!(
            "Error when deleting Product Option. {} | Product.OptionId:{} | Product.OptionName:{}",
            product.describe(),
            option.id,
            option.name
        ))
        .await
    }

    /// Save staged changes; a save that changes nothing is a failure
    async fn commit(&mut self, diagnostic: String) -> ProductResult<()> {
        if self.repository.save().await? {
            Ok(())
        } else {
            error!("{}", diagnostic);
            Err(ProductError::CommitFailed(diagnostic))
        }
    }
}

fn parse_id(raw: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ProductError::InvalidId)
}

fn parse_option_id(raw: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ProductError::InvalidOptionId)
}
