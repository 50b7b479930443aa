//! Test support for the product catalog crates
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: ids and names derived from the test name
//! - `assertions`: panics that say what was being checked
//!
//! # Features
//!
//! - `mongo`: Enables MongoDB test infrastructure
//!
//! # Usage
//!
//! Add `features = ["mongo"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```
//!
//! Then in your tests:
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let db = mongo.database();
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let product_name = builder.name("product", "main");
//! }
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Per-test source of ids and names
///
/// Everything is derived from the test name, so a failing test produces the
/// same data on every run and two tests never collide on a product name.
pub struct TestDataBuilder {
    test_name: String,
    seed: u64,
}

impl TestDataBuilder {
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("create_product");
    /// assert_eq!(builder.name("product", "main"), "create_product-product-main");
    /// ```
    pub fn from_test_name(test_name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        test_name.hash(&mut hasher);

        Self {
            test_name: test_name.to_string(),
            seed: hasher.finish(),
        }
    }

    /// Deterministic id for lookups that must miss
    pub fn id(&self) -> Uuid {
        Uuid::from_u64_pair(self.seed, self.seed.rotate_left(32))
    }

    /// `<test>-<kind>-<suffix>`
    pub fn name(&self, kind: &str, suffix: &str) -> String {
        format!("{}-{}-{}", self.test_name, kind, suffix)
    }
}

/// Assertions with context in the panic message
pub mod assertions {
    use uuid::Uuid;

    #[track_caller]
    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, what: &str) {
        if actual != expected {
            panic!("{what}: {actual} != {expected}");
        }
    }

    /// Unwrap `value`, naming `what` was missing on failure
    #[track_caller]
    pub fn assert_some<T>(value: Option<T>, what: &str) -> T {
        match value {
            Some(value) => value,
            None => panic!("{what}: got None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_stable_per_test_name() {
        let first = TestDataBuilder::from_test_name("stable");
        let second = TestDataBuilder::from_test_name("stable");

        assert_eq!(first.id(), second.id());
        assert_eq!(first.name("product", "a"), second.name("product", "a"));
    }

    #[test]
    fn test_builders_for_different_tests_differ() {
        let first = TestDataBuilder::from_test_name("first");
        let second = TestDataBuilder::from_test_name("second");

        assert_ne!(first.id(), second.id());
        assert_ne!(first.name("product", "a"), second.name("product", "a"));
    }

    #[test]
    #[should_panic(expected = "lookup: got None")]
    fn test_assert_some_names_missing_value() {
        assertions::assert_some::<u8>(None, "lookup");
    }
}
