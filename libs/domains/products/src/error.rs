use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found with filter: {0}")]
    NotFound(Uuid),

    #[error("{0}")]
    DuplicateEntry(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Rejection for a second product with the same name and price
    pub fn duplicate(name: &str, price: Decimal) -> Self {
        ProductError::DuplicateEntry(format!(
            "Product with name {} and price {} already exists.",
            name, price
        ))
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_not_found_message() {
        let id = Uuid::parse_str("1e4f214e-85f7-461a-89d0-a751a32e3bb9").unwrap();
        assert_eq!(
            ProductError::NotFound(id).to_string(),
            "Product not found with filter: 1e4f214e-85f7-461a-89d0-a751a32e3bb9"
        );
    }

    #[test]
    fn test_duplicate_message() {
        let err = ProductError::duplicate("Iphone 14 Pro Max", dec!(6.500));
        assert_eq!(
            err.to_string(),
            "Product with name Iphone 14 Pro Max and price 6.500 already exists."
        );
    }
}
