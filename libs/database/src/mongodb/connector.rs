use mongodb::{Client, options::ClientOptions};
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Connect to MongoDB with default pool settings
///
/// ```ignore
/// use database::mongodb::connect;
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let db = client.database("store");
/// ```
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    let config = MongoConfig {
        url: url.to_string(),
        ..MongoConfig::default()
    };
    connect_from_config(&config).await
}

/// Connect using a [`MongoConfig`] and verify the server answers
///
/// The client is only returned once a lightweight `listDatabases` round trip
/// succeeds, so a bad URL or unreachable server fails here rather than on the
/// first product query.
#[instrument(skip(config), fields(database = %config.database))]
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Attempting to connect to MongoDB");

    let options = client_options(config).await?;
    let client = Client::with_options(options)?;

    client
        .list_database_names()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

async fn client_options(config: &MongoConfig) -> DatabaseResult<ClientOptions> {
    let mut options = ClientOptions::parse(config.url.as_str()).await?;

    options.max_pool_size = Some(config.pool.max_size);
    options.min_pool_size = Some(config.pool.min_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);
    options.app_name = config.app_name.clone();

    Ok(options)
}
