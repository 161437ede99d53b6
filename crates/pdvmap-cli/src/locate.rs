//! Location and store lookup command handlers.

use clap::Args;
use pdvmap_api::LocatorApiClient;
use pdvmap_core::{AppConfig, Coordinates, Product, UserLocation};
use pdvmap_locator::{LocationInput, MapHost, MapSync, StoreLocator, SurfaceOptions};

/// Where to search from: a CEP, or a latitude/longitude pair.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Postal code (CEP), with or without the dash
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub cep: Option<String>,
    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    pub(crate) fn to_input(&self) -> anyhow::Result<LocationInput> {
        match (&self.cep, self.lat, self.lon) {
            (Some(cep), _, _) => Ok(LocationInput::PostalCode(cep.clone())),
            (None, Some(lat), Some(lon)) => Ok(LocationInput::Device(
                Coordinates::from_lat_lon(lat, lon)?,
            )),
            _ => anyhow::bail!("pass either --cep or both --lat and --lon"),
        }
    }
}

/// Resolves the location and records it in `locator`.
async fn confirm_location(
    locator: &StoreLocator,
    location: &LocationArgs,
) -> anyhow::Result<UserLocation> {
    let input = location.to_input()?;
    locator
        .resolve_location(input)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    Ok(locator.snapshot().user_location().clone())
}

fn describe(location: &UserLocation) -> String {
    let address = location.display_address.as_deref().unwrap_or("(no address)");
    match location.coordinates {
        Some(at) => format!("{address} [{:.5}, {:.5}]", at.latitude(), at.longitude()),
        None => address.to_string(),
    }
}

pub(crate) async fn run_locate(
    client: LocatorApiClient,
    location: &LocationArgs,
) -> anyhow::Result<()> {
    let locator = StoreLocator::new(client);
    let confirmed = confirm_location(&locator, location).await?;
    println!("location: {}", describe(&confirmed));
    Ok(())
}

/// Resolves the location, looks up stores for `product_id` and mirrors the
/// session's map projection onto `host`.
///
/// # Errors
///
/// Returns an error if the location cannot be resolved or the store lookup
/// fails. The user-facing message is used as the error text.
pub(crate) async fn run_stores<H: MapHost>(
    client: LocatorApiClient,
    config: &AppConfig,
    product_id: &str,
    location: &LocationArgs,
    host: H,
) -> anyhow::Result<()> {
    let locator = StoreLocator::new(client);

    let options = SurfaceOptions {
        style: config.map_style.clone(),
        access_token: config.map_access_token.clone(),
    };
    let mut map = MapSync::new(host, options, locator.map_state());
    map.mount();
    if !map.is_mounted() {
        tracing::warn!("map container has zero size; map output is skipped");
    }

    let confirmed = confirm_location(&locator, location).await?;
    println!("location: {}", describe(&confirmed));
    map.update(locator.map_state());

    let product = find_product(&locator, product_id).await;
    locator
        .select_product(product.clone())
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    map.update(locator.map_state());

    let session = locator.snapshot();
    let stores = session.results();
    if stores.is_empty() {
        println!("no stores carry {} near this location", product.label());
    } else {
        println!("{} stores carry {}:", stores.len(), product.label());
        for (rank, store) in stores.iter().enumerate() {
            println!(
                "{:>3}. {:<32}{:>8.2} km  {}",
                rank + 1,
                store.name,
                store.distance_km,
                store.address
            );
        }
    }

    map.teardown();
    Ok(())
}

/// Looks the id up among the featured products for a friendlier label,
/// falling back to a bare product carrying only the id.
async fn find_product(locator: &StoreLocator, product_id: &str) -> Product {
    if let Err(e) = locator.load_featured().await {
        tracing::debug!(error = %e, "featured products unavailable for labelling");
    }
    locator
        .snapshot()
        .featured_products()
        .iter()
        .find(|p| p.id == product_id)
        .cloned()
        .unwrap_or_else(|| Product {
            id: product_id.to_string(),
            name: format!("product {product_id}"),
            volume: String::new(),
            is_featured: false,
            image_url: String::new(),
            detail_url: None,
        })
}
