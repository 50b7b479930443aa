//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_document, Bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{PriceRange, Product, ProductChanges};
use crate::repository::ProductRepository;

/// Default collection name
pub const PRODUCTS_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Create the lookup indexes for the duplicate check and price queries.
    ///
    /// The (name, price) index is not unique. The pair is only checked when a
    /// product is created; an update may move a record onto a pair another
    /// record already holds.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1, "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_name_price".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    fn name_and_price_filter(name: &str, price: Decimal) -> ProductResult<Document> {
        Ok(doc! { "name": name, "price": price_to_bson(price)? })
    }

    /// Build a MongoDB filter document from an optional price range
    fn build_filter(price_range: Option<PriceRange>) -> ProductResult<Document> {
        let mut filter = doc! {};

        if let Some(range) = price_range {
            filter.insert(
                "price",
                doc! {
                    "$gt": price_to_bson(range.min)?,
                    "$lt": price_to_bson(range.max)?,
                },
            );
        }

        Ok(filter)
    }
}

/// Prices are stored as doubles, matching `rust_decimal::serde::float`
fn price_to_bson(price: Decimal) -> ProductResult<Bson> {
    price
        .to_f64()
        .map(Bson::Double)
        .ok_or_else(|| ProductError::Validation(format!("price {} is not representable", price)))
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_name_and_price(
        &self,
        name: &str,
        price: Decimal,
    ) -> ProductResult<Option<Product>> {
        let filter = Self::name_and_price_filter(name, price)?;
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find(&self, price_range: Option<PriceRange>) -> ProductResult<Vec<Product>> {
        let filter = Self::build_filter(price_range)?;

        let cursor = self.collection.find(filter).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id, product_name = %product.name))]
    async fn insert(&self, product: &Product) -> ProductResult<()> {
        self.collection.insert_one(product).await?;

        tracing::info!("Product inserted successfully");
        Ok(())
    }

    #[instrument(skip(self, changes))]
    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> ProductResult<Option<Product>> {
        let update = doc! { "$set": to_document(&changes)? };

        let product = self
            .collection
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?;

        if product.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count)
    }
}
