//! Catalog command handlers.

use clap::Subcommand;
use pdvmap_api::LocatorApiClient;
use pdvmap_core::Product;
use pdvmap_locator::StoreLocator;

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// List the featured products
    Featured,
    /// Search the catalog by name
    Search {
        /// Free-text search term
        term: String,
    },
}

pub(crate) async fn run_products(
    client: LocatorApiClient,
    command: ProductsCommands,
) -> anyhow::Result<()> {
    let locator = StoreLocator::new(client);

    let products = match command {
        ProductsCommands::Featured => {
            locator
                .load_featured()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            locator.snapshot().featured_products().to_vec()
        }
        ProductsCommands::Search { term } => {
            locator
                .search_products(&term)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            locator.snapshot().found_products().to_vec()
        }
    };

    print_products(&products);
    Ok(())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("no products found");
        return;
    }

    println!("{:<10}{:<40}{:<10}FEATURED", "ID", "NAME", "VOLUME");
    for product in products {
        println!(
            "{:<10}{:<40}{:<10}{}",
            product.id,
            product.name,
            product.volume,
            if product.is_featured { "yes" } else { "" }
        );
    }
}
