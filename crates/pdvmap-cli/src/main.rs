mod console_map;
mod locate;
mod products;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::locate::LocationArgs;
use crate::products::ProductsCommands;

#[derive(Debug, Parser)]
#[command(name = "pdvmap")]
#[command(about = "Find the nearest points of sale carrying a product")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the locator backend is reachable
    Health,
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Resolve a CEP or a coordinate pair to a location
    Locate {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// List the nearest stores carrying a product and draw them on the console map
    Stores {
        /// Catalog id of the product
        #[arg(long)]
        product: String,
        #[command(flatten)]
        location: LocationArgs,
        /// Map container width in columns
        #[arg(long, default_value_t = 80)]
        width: u32,
        /// Map container height in rows
        #[arg(long, default_value_t = 24)]
        height: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = pdvmap_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("pdvmap ready (backend {})", config.api_base_url);
        return Ok(());
    };

    let client = pdvmap_api::LocatorApiClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build locator API client: {e}"))?;

    match command {
        Commands::Health => {
            client.health().await?;
            println!("backend ok: {}", client.base_url());
        }
        Commands::Products { command } => products::run_products(client, command).await?,
        Commands::Locate { location } => locate::run_locate(client, &location).await?,
        Commands::Stores {
            product,
            location,
            width,
            height,
        } => {
            let map = console_map::ConsoleHost::new(width, height);
            locate::run_stores(client, &config, &product, &location, map).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
