//! Product Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductQuery, UpdateProduct, UpdatedProduct};
use crate::repository::ProductRepository;

/// Product service providing the catalog's use cases
///
/// Holds no state besides the injected repository; every call re-reads the
/// store. Existence and duplicate checks are separate round trips from the
/// write that follows them.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product, rejecting a second one with the same name and price
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        if self
            .repository
            .find_by_name_and_price(&input.name, input.price)
            .await?
            .is_some()
        {
            return Err(ProductError::duplicate(&input.name, input.price));
        }

        let product = Product::new(input);
        self.repository.insert(&product).await?;

        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products, filtered by price only when both bounds are given
    #[instrument(skip(self))]
    pub async fn query(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        self.repository.find(query.price_range()).await
    }

    /// Apply the set fields of `input` and stamp `updated_at`
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<UpdatedProduct> {
        input.validate()?;

        self.ensure_exists(id).await?;

        let changes = input.into_changes(Utc::now());

        // The product may have been deleted since the check above
        let updated = self
            .repository
            .find_one_and_update(id, changes)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        updated.try_into()
    }

    /// Delete a product
    ///
    /// Returns `false` only if the product disappeared between the existence
    /// check and the delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        self.ensure_exists(id).await?;

        let deleted = self.repository.delete(id).await?;
        Ok(deleted > 0)
    }

    async fn ensure_exists(&self, id: Uuid) -> ProductResult<()> {
        match self.repository.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::NotFound(id)),
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
