//! Turns a CEP or a device fix into a confirmed [`UserLocation`].

use pdvmap_api::normalize::record_coordinates;
use pdvmap_api::LocatorApiClient;
use pdvmap_core::{Coordinates, PostalCode, UserLocation};

use crate::error::{LocationError, LOOKUP_FALLBACK_MESSAGE};

/// What the shopper gave us to locate them.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Raw CEP text as typed; formatting characters are allowed.
    PostalCode(String),
    /// A position already obtained from the device.
    Device(Coordinates),
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    api: LocatorApiClient,
}

impl LocationResolver {
    #[must_use]
    pub fn new(api: LocatorApiClient) -> Self {
        Self { api }
    }

    /// Resolves `input` to a location with coordinates.
    ///
    /// CEP input is validated locally before any request. The backend's
    /// proximity search geocodes the CEP and its first record is taken as
    /// the location; its `endereco` becomes the display address.
    ///
    /// Device input never fails: a reverse-geocoding failure degrades to a
    /// `"lat, lon"` display string.
    ///
    /// # Errors
    ///
    /// - [`LocationError::InvalidPostalCode`] when the CEP does not have 8 digits.
    /// - [`LocationError::LocationLookupFailed`] on a backend failure or an empty result.
    /// - [`LocationError::NoCoordinatesForLocation`] when the first record cannot be placed.
    pub async fn resolve(&self, input: LocationInput) -> Result<UserLocation, LocationError> {
        match input {
            LocationInput::PostalCode(raw) => self.resolve_postal_code(&raw).await,
            LocationInput::Device(at) => Ok(self.resolve_device(at).await),
        }
    }

    async fn resolve_postal_code(&self, raw: &str) -> Result<UserLocation, LocationError> {
        let cep = PostalCode::parse(raw)?;

        let closest = self
            .api
            .closest_by_postal_code(&cep)
            .await
            .map_err(|e| {
                tracing::warn!(cep = %cep, error = %e, "postal code lookup failed");
                LocationError::lookup_failed(&e)
            })?;

        let Some(first) = closest else {
            tracing::info!(cep = %cep, "postal code lookup returned no records");
            return Err(LocationError::LocationLookupFailed(
                LOOKUP_FALLBACK_MESSAGE.to_string(),
            ));
        };

        let coordinates =
            record_coordinates(&first).ok_or(LocationError::NoCoordinatesForLocation)?;
        let address = first.endereco.filter(|a| !a.trim().is_empty());

        tracing::debug!(cep = %cep, address = ?address, "postal code resolved");
        Ok(UserLocation::new(coordinates, address))
    }

    async fn resolve_device(&self, at: Coordinates) -> UserLocation {
        let address = match self.api.reverse_geocode(at).await {
            Ok(Some(formatted)) => formatted,
            Ok(None) => at.display_fallback(),
            Err(e) => {
                tracing::debug!(error = %e, "reverse geocoding failed, using coordinates");
                at.display_fallback()
            }
        };
        UserLocation::new(at, Some(address))
    }
}
