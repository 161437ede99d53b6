//! Product catalog endpoints.

use pdvmap_core::Product;

use crate::client::{expect_list, LocatorApiClient};
use crate::error::ApiError;
use crate::normalize::normalize_product;
use crate::types::ProductRecord;

impl LocatorApiClient {
    /// Fetches the featured products shown before any search.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport or status failure.
    /// - [`ApiError::Rejected`] / [`ApiError::UnexpectedShape`] if the body is not a list.
    /// - [`ApiError::Deserialize`] if an entry is not a product.
    pub async fn featured_products(&self) -> Result<Vec<Product>, ApiError> {
        let body = self.get_json("produtos/destaque", &[]).await?;
        decode_products(body, "produtos/destaque")
    }

    /// Searches the catalog by free-text term.
    ///
    /// # Errors
    ///
    /// Same as [`LocatorApiClient::featured_products`]; backend `erro`
    /// messages are available through [`ApiError::server_message`].
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        let body = self.get_json("produtos/buscar", &[("q", term)]).await?;
        decode_products(body, "produtos/buscar")
    }
}

fn decode_products(body: serde_json::Value, context: &str) -> Result<Vec<Product>, ApiError> {
    let items = expect_list(body, context)?;
    let records: Vec<ProductRecord> =
        serde_json::from_value(serde_json::Value::Array(items)).map_err(|e| {
            ApiError::Deserialize {
                context: context.to_owned(),
                source: e,
            }
        })?;
    Ok(records.into_iter().map(normalize_product).collect())
}
