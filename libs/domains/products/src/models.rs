use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::ProductError;

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    /// Stored as a BSON double so range filters compare numerically
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    /// `None` until the first update
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Output of an update: same as [`Product`] with `updated_at` guaranteed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedProduct {
    #[serde(rename = "_id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

/// A field in a partial update: either left alone or set to a value.
///
/// Missing keys and explicit `null` both decode to [`Patch::Unset`], so a
/// patch never clears a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    Unset,
    Set(T),
}

/// DTO for updating an existing product; only `Set` fields are applied
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateProduct {
    #[serde(default)]
    #[validate(custom(function = "validate_name_patch"))]
    pub name: Patch<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_price_patch"))]
    pub price: Patch<Decimal>,
}

/// Field-level delta sent to the store by an update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing products
///
/// The price filter is only active when both bounds are supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ProductQuery {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

/// Exclusive price bounds: matches `min < price < max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl Product {
    /// Build a new record from a validated DTO with a fresh random id
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            price: input.price,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Apply a delta in place, the way the store's `$set` does
    pub fn apply_changes(&mut self, changes: &ProductChanges) {
        if let Some(ref name) = changes.name {
            self.name = name.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.updated_at = Some(changes.updated_at);
    }
}

impl TryFrom<Product> for UpdatedProduct {
    type Error = ProductError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        let updated_at = product.updated_at.ok_or_else(|| {
            ProductError::Internal(format!("Product {} has no updated_at after update", product.id))
        })?;

        Ok(Self {
            id: product.id,
            name: product.name,
            price: product.price,
            created_at: product.created_at,
            updated_at,
        })
    }
}

impl<T> Patch<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Unset => None,
            Patch::Set(value) => Some(value),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Unset, Patch::Set)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Unset => serializer.serialize_none(),
            Patch::Set(value) => serializer.serialize_some(value),
        }
    }
}

impl UpdateProduct {
    /// Delta for this patch, stamped with `updated_at`
    pub fn into_changes(self, updated_at: DateTime<Utc>) -> ProductChanges {
        ProductChanges {
            name: self.name.into_option(),
            price: self.price.into_option(),
            updated_at,
        }
    }
}

impl ProductQuery {
    pub fn new(min_price: Option<Decimal>, max_price: Option<Decimal>) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    /// `Some` only when both bounds are present; a lone bound is ignored
    pub fn price_range(&self) -> Option<PriceRange> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => Some(PriceRange { min, max }),
            _ => None,
        }
    }
}

impl PriceRange {
    pub fn contains(&self, price: Decimal) -> bool {
        self.min < price && price < self.max
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

fn validate_name_patch(name: &Patch<String>) -> Result<(), ValidationError> {
    match name {
        Patch::Set(name) if name.is_empty() || name.chars().count() > 200 => {
            let mut err = ValidationError::new("length");
            err.message = Some("name must be between 1 and 200 characters".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

fn validate_price_patch(price: &Patch<Decimal>) -> Result<(), ValidationError> {
    match price {
        Patch::Set(price) => validate_price(price),
        Patch::Unset => Ok(()),
    }
}

/// Stores ids as hyphenated strings so filters built with `doc!` match the
/// documents the driver serialized.
mod uuid_as_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&id.hyphenated())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(D::Error::custom)
    }
}
