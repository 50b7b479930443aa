//! Service-level tests for the Products domain
//!
//! These run the full use cases against `InMemoryProductRepository`, so they
//! need no running database.

use chrono::Utc;
use domain_products::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{assertions::*, TestDataBuilder};
use uuid::Uuid;

fn service() -> ProductService<InMemoryProductRepository> {
    ProductService::new(InMemoryProductRepository::new())
}

fn create_input(name: &str, price: Decimal) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        price,
    }
}

fn assert_not_found<T: std::fmt::Debug>(result: ProductResult<T>, id: Uuid) {
    match result {
        Err(err @ ProductError::NotFound(_)) => {
            assert_eq!(err.to_string(), format!("Product not found with filter: {}", id));
        }
        other => panic!("Expected NotFound for {}, got {:?}", id, other),
    }
}

// ============================================================================
// Create / Get
// ============================================================================

#[tokio::test]
async fn test_create_then_get() {
    let service = service();
    let builder = TestDataBuilder::from_test_name("create_then_get");
    let name = builder.name("product", "main");

    let created = service.create(create_input(&name, dec!(12.99))).await.unwrap();
    assert!(created.updated_at.is_none());

    let fetched = service.get(created.id).await.unwrap();
    assert_uuid_eq(fetched.id, created.id, "fetched product id");
    assert_eq!(fetched.name, name);
    assert_eq!(fetched.price, dec!(12.99));
}

#[tokio::test]
async fn test_create_duplicate_stores_one_record() {
    let repository = InMemoryProductRepository::new();
    let service = ProductService::new(repository);
    let builder = TestDataBuilder::from_test_name("create_duplicate");
    let name = builder.name("product", "dup");

    service.create(create_input(&name, dec!(6.500))).await.unwrap();
    let result = service.create(create_input(&name, dec!(6.5))).await;

    match result {
        Err(err @ ProductError::DuplicateEntry(_)) => {
            assert_eq!(
                err.to_string(),
                format!("Product with name {} and price 6.5 already exists.", name)
            );
        }
        other => panic!("Expected DuplicateEntry, got {:?}", other),
    }

    let all = service.query(ProductQuery::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_same_name_different_price_is_allowed() {
    let service = service();

    service.create(create_input("Widget", dec!(1))).await.unwrap();
    service.create(create_input("Widget", dec!(2))).await.unwrap();

    let all = service.query(ProductQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let service = service();

    let result = service.create(create_input("", dec!(1))).await;
    assert!(matches!(result, Err(ProductError::Validation(_))), "{:?}", result);

    let result = service.create(create_input("Widget", dec!(-1))).await;
    assert!(matches!(result, Err(ProductError::Validation(_))), "{:?}", result);

    assert!(service.query(ProductQuery::default()).await.unwrap().is_empty());
}

// ============================================================================
// NotFound on unknown ids
// ============================================================================

#[tokio::test]
async fn test_unknown_id_is_not_found_everywhere() {
    let service = service();
    let id = Uuid::parse_str("1e4f214e-85f7-461a-89d0-a751a32e3bb9").unwrap();

    assert_not_found(service.get(id).await, id);
    assert_not_found(
        service
            .update(
                id,
                UpdateProduct {
                    price: Patch::Set(dec!(1)),
                    ..Default::default()
                },
            )
            .await,
        id,
    );
    assert_not_found(service.delete(id).await, id);
}

// ============================================================================
// Query
// ============================================================================

async fn seeded_service() -> ProductService<InMemoryProductRepository> {
    let service = service();
    for (name, price) in [
        ("five", dec!(5)),
        ("six", dec!(6)),
        ("seven", dec!(7.999)),
        ("eight", dec!(8)),
        ("nine", dec!(9)),
    ] {
        service.create(create_input(name, price)).await.unwrap();
    }
    service
}

fn names(products: Vec<Product>) -> Vec<String> {
    products.into_iter().map(|p| p.name).collect()
}

#[tokio::test]
async fn test_query_without_bounds_returns_all_in_order() {
    let service = seeded_service().await;

    let all = service.query(ProductQuery::default()).await.unwrap();
    assert_eq!(names(all), ["five", "six", "seven", "eight", "nine"]);
}

#[tokio::test]
async fn test_query_range_excludes_boundaries() {
    let service = seeded_service().await;

    let found = service
        .query(ProductQuery::new(Some(dec!(5)), Some(dec!(8))))
        .await
        .unwrap();
    assert_eq!(names(found), ["six", "seven"]);
}

#[tokio::test]
async fn test_query_single_bound_is_ignored() {
    let service = seeded_service().await;

    let min_only = service
        .query(ProductQuery::new(Some(dec!(8)), None))
        .await
        .unwrap();
    assert_eq!(min_only.len(), 5);

    let max_only = service
        .query(ProductQuery::new(None, Some(dec!(6))))
        .await
        .unwrap();
    assert_eq!(max_only.len(), 5);
}

#[tokio::test]
async fn test_query_empty_range() {
    let service = seeded_service().await;

    let found = service
        .query(ProductQuery::new(Some(dec!(9)), Some(dec!(5))))
        .await
        .unwrap();
    assert!(found.is_empty());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let service = service();
    let created = service
        .create(create_input("Iphone 14 Pro Max", dec!(6.500)))
        .await
        .unwrap();
    let started = Utc::now();

    let updated = service
        .update(
            created.id,
            UpdateProduct {
                price: Patch::Set(dec!(7.500)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_uuid_eq(updated.id, created.id, "updated product id");
    assert_eq!(updated.name, "Iphone 14 Pro Max");
    assert_eq!(updated.price, dec!(7.500));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= started);

    let stored = service.get(created.id).await.unwrap();
    assert_eq!(stored.price, dec!(7.500));
    assert_eq!(stored.updated_at, Some(updated.updated_at));
}

#[tokio::test]
async fn test_empty_update_only_touches_timestamp() {
    let service = service();
    let created = service.create(create_input("Widget", dec!(3))).await.unwrap();

    let updated = service
        .update(created.id, UpdateProduct::default())
        .await
        .unwrap();

    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.price, dec!(3));
    assert!(updated.updated_at >= created.created_at);
}

#[tokio::test]
async fn test_update_onto_existing_pair_is_allowed() {
    let service = service();
    let widget = service.create(create_input("Widget", dec!(1))).await.unwrap();
    let gadget = service.create(create_input("Gadget", dec!(1))).await.unwrap();

    let updated = service
        .update(
            gadget.id,
            UpdateProduct {
                name: Patch::Set("Widget".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Widget");
    assert_eq!(service.get(widget.id).await.unwrap().name, "Widget");

    // The pair is still guarded at creation time
    let result = service.create(create_input("Widget", dec!(1))).await;
    assert!(matches!(result, Err(ProductError::DuplicateEntry(_))), "{:?}", result);
    assert_eq!(service.query(ProductQuery::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_rejects_invalid_patch() {
    let service = service();
    let created = service.create(create_input("Widget", dec!(3))).await.unwrap();

    let result = service
        .update(
            created.id,
            UpdateProduct {
                name: Patch::Set(String::new()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ProductError::Validation(_))), "{:?}", result);

    let stored = service.get(created.id).await.unwrap();
    assert!(stored.updated_at.is_none());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_then_get_and_delete_again() {
    let service = service();
    let created = service.create(create_input("Widget", dec!(3))).await.unwrap();

    assert!(service.delete(created.id).await.unwrap());
    assert_not_found(service.get(created.id).await, created.id);
    assert_not_found(service.delete(created.id).await, created.id);
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn test_product_lifecycle() {
    let service = service();

    let created = service
        .create(create_input("Iphone 14 Pro Max", dec!(6.500)))
        .await
        .unwrap();
    let id = created.id;

    assert_eq!(service.get(id).await.unwrap().name, "Iphone 14 Pro Max");

    let updated = service
        .update(
            id,
            UpdateProduct {
                price: Patch::Set(dec!(7.500)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, dec!(7.500));
    assert_eq!(updated.name, "Iphone 14 Pro Max");

    assert!(service.delete(id).await.unwrap());
    assert_not_found(service.get(id).await, id);
}

#[tokio::test]
async fn test_cloned_service_shares_store() {
    let service = service();
    let clone = service.clone();

    let created = service.create(create_input("Widget", dec!(3))).await.unwrap();
    let fetched = clone.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}
