//! Error taxonomy for the locator flow.
//!
//! Every variant is recovered into the session's single message slot; none
//! of them is meant to abort the program. `user_message()` returns the copy
//! shown to the shopper (pt-BR), while `Display` stays developer-facing.

use pdvmap_api::ApiError;
use pdvmap_core::PostalCodeError;
use thiserror::Error;

pub(crate) const LOOKUP_FALLBACK_MESSAGE: &str =
    "Não foi possível validar o CEP. Tente novamente.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// Local validation failed; no request was made.
    #[error("invalid postal code: {0}")]
    InvalidPostalCode(#[from] PostalCodeError),

    /// The backend rejected the CEP or answered with nothing usable.
    #[error("location lookup failed: {0}")]
    LocationLookupFailed(String),

    /// The backend knows the CEP but could not place it on a map.
    #[error("postal code resolved without usable coordinates")]
    NoCoordinatesForLocation,

    #[error("device geolocation is not available")]
    GeolocationUnavailable,

    #[error("device geolocation failed: {0}")]
    GeolocationDenied(String),
}

impl LocationError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LocationError::InvalidPostalCode(_) => {
                "CEP inválido. Deve conter 8 dígitos.".to_string()
            }
            LocationError::LocationLookupFailed(message) => message.clone(),
            LocationError::NoCoordinatesForLocation => {
                "CEP válido, mas sem coordenadas para exibir no mapa. Tente outro CEP.".to_string()
            }
            LocationError::GeolocationUnavailable => {
                "Geolocalização não é suportada neste dispositivo. Por favor, digite seu CEP."
                    .to_string()
            }
            LocationError::GeolocationDenied(reason) => {
                format!("Erro ao obter sua localização: {reason}. Por favor, digite seu CEP.")
            }
        }
    }

    /// Maps a backend failure on the CEP lookup, preferring the server's
    /// own wording.
    pub(crate) fn lookup_failed(err: &ApiError) -> Self {
        let message = err
            .server_message()
            .map_or_else(|| LOOKUP_FALLBACK_MESSAGE.to_string(), str::to_owned);
        LocationError::LocationLookupFailed(message)
    }
}

/// Why the device could not supply a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationFailure {
    /// The platform has no geolocation support.
    Unsupported,
    /// Permission denied, timeout or another platform error.
    Failed(String),
}

impl From<GeolocationFailure> for LocationError {
    fn from(failure: GeolocationFailure) -> Self {
        match failure {
            GeolocationFailure::Unsupported => LocationError::GeolocationUnavailable,
            GeolocationFailure::Failed(reason) => LocationError::GeolocationDenied(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreLookupError {
    /// A store lookup was attempted before a location was confirmed.
    #[error("a confirmed location is required before looking up stores")]
    LocationRequired,

    #[error("store lookup failed: {0}")]
    StoreLookupFailed(String),
}

impl StoreLookupError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StoreLookupError::LocationRequired => {
                "Por favor, informe sua localização primeiro para encontrar lojas.".to_string()
            }
            StoreLookupError::StoreLookupFailed(detail) => {
                format!("Erro ao buscar locais para o produto: {detail}.")
            }
        }
    }

    pub(crate) fn lookup_failed(err: &ApiError) -> Self {
        StoreLookupError::StoreLookupFailed(api_detail(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("featured products unavailable: {0}")]
    FeaturedProductsUnavailable(String),

    #[error("product search failed: {0}")]
    ProductSearchFailed(String),
}

impl CatalogError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::FeaturedProductsUnavailable(_) => {
                "Não foi possível carregar os produtos em destaque.".to_string()
            }
            CatalogError::ProductSearchFailed(detail) => {
                format!("Erro ao buscar produtos: {detail}.")
            }
        }
    }
}

/// Server-supplied text when present, otherwise the transport-level reason.
pub(crate) fn api_detail(err: &ApiError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_owned();
    }
    match err {
        ApiError::Status { status, .. } => format!("HTTP {status}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_postal_code_and_missing_coordinates_have_distinct_messages() {
        let invalid = LocationError::InvalidPostalCode(PostalCodeError { digits: 3 });
        let unplaceable = LocationError::NoCoordinatesForLocation;
        assert_ne!(invalid.user_message(), unplaceable.user_message());
    }

    #[test]
    fn lookup_failed_prefers_server_message() {
        let err = LocationError::lookup_failed(&ApiError::Rejected("CEP inexistente".to_string()));
        assert_eq!(err.user_message(), "CEP inexistente");
    }

    #[test]
    fn lookup_failed_falls_back_to_generic_message() {
        let err = LocationError::lookup_failed(&ApiError::UnexpectedShape {
            context: "pdvs/proximos".to_string(),
        });
        assert_eq!(err.user_message(), LOOKUP_FALLBACK_MESSAGE);
    }

    #[test]
    fn geolocation_failures_map_to_location_errors() {
        assert_eq!(
            LocationError::from(GeolocationFailure::Unsupported),
            LocationError::GeolocationUnavailable
        );
        let denied = LocationError::from(GeolocationFailure::Failed("User denied".to_string()));
        assert!(denied.user_message().contains("User denied"));
    }

    #[test]
    fn api_detail_uses_status_code_without_server_text() {
        let err = ApiError::Status {
            status: 502,
            url: "http://localhost/pdvs/proximos/produto".to_string(),
            message: None,
        };
        assert_eq!(api_detail(&err), "HTTP 502");
    }

    #[test]
    fn store_lookup_failed_message_embeds_detail() {
        let err = StoreLookupError::StoreLookupFailed("produto sem estoque".to_string());
        assert_eq!(
            err.user_message(),
            "Erro ao buscar locais para o produto: produto sem estoque."
        );
    }
}
