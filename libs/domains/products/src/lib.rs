//! Products Domain
//!
//! Catalog use cases (create, get, query, update, delete) over a MongoDB
//! collection of products.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Use cases, validation, duplicate/existence checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//!     CreateProduct,
//! };
//! use mongodb::Client;
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("store");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository);
//!
//! let product = service
//!     .create(CreateProduct {
//!         name: "Iphone 14 Pro Max".to_string(),
//!         price: Decimal::new(6500, 3),
//!     })
//!     .await?;
//! println!("created {}", product.id);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use models::{
    CreateProduct, Patch, PriceRange, Product, ProductChanges, ProductQuery, UpdateProduct,
    UpdatedProduct,
};
pub use mongodb::{MongoProductRepository, PRODUCTS_COLLECTION};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
