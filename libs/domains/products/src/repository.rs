use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{PriceRange, Product, ProductChanges};

/// Repository trait for Product persistence
///
/// Each method is one round trip to the document store. Business rules
/// (duplicate checks, existence checks, timestamps) live in
/// [`ProductService`](crate::service::ProductService), not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by its identifier
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Find a product whose name and price both match exactly
    async fn find_by_name_and_price(
        &self,
        name: &str,
        price: Decimal,
    ) -> ProductResult<Option<Product>>;

    /// All products, optionally restricted to an exclusive price range,
    /// in the store's natural order
    async fn find(&self, price_range: Option<PriceRange>) -> ProductResult<Vec<Product>>;

    /// Insert a new product as-is; (name, price) uniqueness is checked by
    /// the caller beforehand
    async fn insert(&self, product: &Product) -> ProductResult<()>;

    /// Apply `changes` to the product with `id` and return the new version,
    /// or `None` when no product matched
    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> ProductResult<Option<Product>>;

    /// Delete the product with `id`, returning how many records were removed
    async fn delete(&self, id: Uuid) -> ProductResult<u64>;
}

/// In-memory implementation for testing
///
/// Records are kept in insertion order, which stands in for the natural
/// order of a MongoDB collection scan.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name_and_price(
        &self,
        name: &str,
        price: Decimal,
    ) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.name == name && p.price == price)
            .cloned())
    }

    async fn find(&self, price_range: Option<PriceRange>) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| price_range.is_none_or(|range| range.contains(p.price)))
            .cloned()
            .collect())
    }

    async fn insert(&self, product: &Product) -> ProductResult<()> {
        let mut products = self.products.write().await;

        products.push(product.clone());
        tracing::info!(product_id = %product.id, "Inserted product");
        Ok(())
    }

    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            product.apply_changes(&changes);
            tracing::info!(product_id = %id, "Updated product");
            product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        let mut products = self.products.write().await;

        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                tracing::info!(product_id = %id, "Deleted product");
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
