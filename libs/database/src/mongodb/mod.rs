//! MongoDB connector and utilities

mod config;
mod connector;
mod health;

pub use config::{MongoConfig, PoolSettings};
pub use connector::{connect, connect_from_config};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
