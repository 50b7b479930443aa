use core_config::{FromEnv, env_or_default};
use database::mongodb::MongoConfig;
use domain_products::PRODUCTS_COLLECTION;

pub use core_config::Environment;

/// CLI configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub mongodb: MongoConfig,
    /// Collection holding product documents (`PRODUCTS_COLLECTION`)
    pub collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let collection = env_or_default("PRODUCTS_COLLECTION", PRODUCTS_COLLECTION);

        Ok(Self {
            environment,
            mongodb,
            collection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("APP_ENV", None),
                ("MONGODB_URL", Some("mongodb://catalog:27017")),
                ("MONGODB_DATABASE", Some("store")),
                ("PRODUCTS_COLLECTION", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.mongodb.url(), "mongodb://catalog:27017");
                assert_eq!(config.mongodb.database(), "store");
                assert_eq!(config.collection, "products");
            },
        );
    }

    #[test]
    fn test_config_collection_override() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                ("MONGODB_URL", None),
                ("MONGO_URL", Some("mongodb://legacy:27017")),
                ("MONGODB_DATABASE", Some("store")),
                ("PRODUCTS_COLLECTION", Some("catalog_products")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.environment.is_production());
                assert_eq!(config.mongodb.url(), "mongodb://legacy:27017");
                assert_eq!(config.collection, "catalog_products");
            },
        );
    }

    #[test]
    fn test_config_requires_mongo_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", Some("store")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_URL or MONGO_URL"));
            },
        );
    }
}
