//! Featured products and free-text product search.

use pdvmap_api::LocatorApiClient;
use pdvmap_core::Product;

use crate::error::{api_detail, CatalogError};

#[derive(Debug, Clone)]
pub struct ProductCatalog {
    api: LocatorApiClient,
}

impl ProductCatalog {
    #[must_use]
    pub fn new(api: LocatorApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::FeaturedProductsUnavailable`] on any backend failure.
    pub async fn featured(&self) -> Result<Vec<Product>, CatalogError> {
        self.api.featured_products().await.map_err(|e| {
            tracing::warn!(error = %e, "featured products unavailable");
            CatalogError::FeaturedProductsUnavailable(api_detail(&e))
        })
    }

    /// Searches by `term`. A blank term yields an empty list without a request.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductSearchFailed`] on any backend failure.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.api.search_products(term).await.map_err(|e| {
            tracing::warn!(term, error = %e, "product search failed");
            CatalogError::ProductSearchFailed(api_detail(&e))
        })
    }
}
