//! Products CLI
//!
//! Runs the product catalog use cases against MongoDB from the command line.
//! Every command prints its result as pretty JSON on stdout.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{check_health_detailed, connect_from_config};
use domain_products::{
    CreateProduct, MongoProductRepository, Patch, ProductQuery, ProductRepository,
    ProductService, UpdateProduct,
};
use eyre::Result;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "products-cli")]
#[command(about = "Create, query, update and delete catalog products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Create a product
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        price: Decimal,
    },

    /// Fetch a product by id
    Get { id: Uuid },

    /// List products, optionally with an exclusive price range
    ///
    /// The range only applies when both bounds are given.
    Query {
        #[arg(long)]
        min_price: Option<Decimal>,

        #[arg(long)]
        max_price: Option<Decimal>,
    },

    /// Change the name and/or price of a product
    Update {
        id: Uuid,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        price: Option<Decimal>,
    },

    /// Delete a product
    Delete { id: Uuid },

    /// Create the collection indexes (name+price, price)
    InitIndexes,

    /// Ping MongoDB
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(database = %config.mongodb.database(), "Connecting to MongoDB...");
    let client = connect_from_config(&config.mongodb).await?;
    let db = client.database(config.mongodb.database());

    let output = match cli.command {
        Commands::Health => {
            let status = check_health_detailed(&client).await.into_result()?;
            json!({
                "healthy": status.healthy,
                "response_time_ms": status.response_time_ms,
            })
        }
        Commands::InitIndexes => {
            let repository = MongoProductRepository::with_collection(&db, &config.collection);
            repository.init_indexes().await?;
            json!({ "collection": config.collection, "indexes_created": true })
        }
        command => {
            let repository = MongoProductRepository::with_collection(&db, &config.collection);
            run(&ProductService::new(repository), command).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Execute one product use case and render its result
async fn run<R: ProductRepository>(service: &ProductService<R>, command: Commands) -> Result<Value> {
    let output = match command {
        Commands::Create { name, price } => {
            let product = service.create(CreateProduct { name, price }).await?;
            serde_json::to_value(product)?
        }
        Commands::Get { id } => serde_json::to_value(service.get(id).await?)?,
        Commands::Query {
            min_price,
            max_price,
        } => {
            let products = service
                .query(ProductQuery::new(min_price, max_price))
                .await?;
            serde_json::to_value(products)?
        }
        Commands::Update { id, name, price } => {
            let input = UpdateProduct {
                name: Patch::from(name),
                price: Patch::from(price),
            };
            serde_json::to_value(service.update(id, input).await?)?
        }
        Commands::Delete { id } => json!({ "deleted": service.delete(id).await? }),
        Commands::InitIndexes | Commands::Health => {
            eyre::bail!("command needs a MongoDB connection")
        }
    };

    Ok(output)
}
