//! Nearest point-of-sale lookup for a chosen product.

use pdvmap_api::LocatorApiClient;
use pdvmap_core::{Coordinates, PointOfSale, Product, UserLocation, Viewport};

use crate::error::StoreLookupError;

/// Ranked stores plus where the map should look.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSearch {
    /// Ascending by distance, as the backend ranked them.
    pub points: Vec<PointOfSale>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone)]
pub struct NearestStoreFinder {
    api: LocatorApiClient,
}

impl NearestStoreFinder {
    #[must_use]
    pub fn new(api: LocatorApiClient) -> Self {
        Self { api }
    }

    /// Looks up the points of sale carrying `product` nearest to `location`.
    ///
    /// # Errors
    ///
    /// - [`StoreLookupError::LocationRequired`] when `location` has no
    ///   coordinates. No request is made.
    /// - [`StoreLookupError::StoreLookupFailed`] on any backend failure,
    ///   including a malformed record.
    pub async fn find_nearest(
        &self,
        product: &Product,
        location: &UserLocation,
    ) -> Result<StoreSearch, StoreLookupError> {
        let origin = location
            .coordinates
            .ok_or(StoreLookupError::LocationRequired)?;

        let points = self
            .api
            .nearby_for_product(&product.id, origin)
            .await
            .map_err(|e| {
                tracing::warn!(product_id = %product.id, error = %e, "store lookup failed");
                StoreLookupError::lookup_failed(&e)
            })?;

        tracing::info!(
            product_id = %product.id,
            count = points.len(),
            "store lookup complete"
        );

        let viewport = suggested_viewport(&points, origin);
        Ok(StoreSearch { points, viewport })
    }
}

/// Close-up on the nearest store, or a city-level view of `origin` when
/// nothing was found.
#[must_use]
pub fn suggested_viewport(points: &[PointOfSale], origin: Coordinates) -> Viewport {
    points
        .first()
        .map_or_else(|| Viewport::city(origin), |nearest| Viewport::close(nearest.coordinates))
}
