//! Proximity and geocoding endpoints.

use pdvmap_core::{Coordinates, PointOfSale, PostalCode};

use crate::client::{expect_list, LocatorApiClient};
use crate::error::ApiError;
use crate::normalize::normalize_point_of_sale;
use crate::types::{PdvRecord, ReverseGeocodeResponse};

impl LocatorApiClient {
    /// The point of sale closest to a CEP, which doubles as the location
    /// confirmation: the backend geocodes the CEP itself. Only the first
    /// record is decoded, returned raw, and may lack coordinates. `None`
    /// for an empty list.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport or status failure.
    /// - [`ApiError::Rejected`] when the body is an `{"erro": ...}` object.
    /// - [`ApiError::UnexpectedShape`] / [`ApiError::Deserialize`] when the body
    ///   or its first record has the wrong shape.
    pub async fn closest_by_postal_code(
        &self,
        cep: &PostalCode,
    ) -> Result<Option<PdvRecord>, ApiError> {
        let body = self
            .get_json("pdvs/proximos", &[("cep", cep.as_str())])
            .await?;
        let Some(first) = expect_list(body, "pdvs/proximos")?.into_iter().next() else {
            return Ok(None);
        };
        serde_json::from_value(first)
            .map(Some)
            .map_err(|e| ApiError::Deserialize {
                context: "pdvs/proximos[0]".to_owned(),
                source: e,
            })
    }

    /// Points of sale carrying `product_id`, ranked by ascending distance
    /// from `origin`. Order is preserved exactly as the backend sends it.
    ///
    /// # Errors
    ///
    /// Same as [`LocatorApiClient::closest_by_postal_code`], plus
    /// [`ApiError::Malformed`] if any record is not a placeable point of sale.
    pub async fn nearby_for_product(
        &self,
        product_id: &str,
        origin: Coordinates,
    ) -> Result<Vec<PointOfSale>, ApiError> {
        let lat = origin.latitude().to_string();
        let lon = origin.longitude().to_string();
        let body = self
            .get_json(
                "pdvs/proximos/produto",
                &[("productId", product_id), ("lat", &lat), ("lon", &lon)],
            )
            .await?;
        let records = decode_records(body, "pdvs/proximos/produto")?;

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                normalize_point_of_sale(record).map_err(|reason| ApiError::Malformed {
                    context: format!("pdvs/proximos/produto[{index}]"),
                    reason,
                })
            })
            .collect()
    }

    /// Human-readable address for a coordinate pair, when the backend has one.
    ///
    /// Returns `Ok(None)` for a 2xx response without a usable `formatted`
    /// field. Made once, never retried: callers fall back to coordinates.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport or status failure.
    /// - [`ApiError::Deserialize`] if the body is not an object.
    pub async fn reverse_geocode(&self, at: Coordinates) -> Result<Option<String>, ApiError> {
        let lat = at.latitude().to_string();
        let lon = at.longitude().to_string();
        let body = self
            .get_json_once("geocode/reverse", &[("lat", &lat), ("lon", &lon)])
            .await?;
        let parsed: ReverseGeocodeResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: "geocode/reverse".to_owned(),
                source: e,
            })?;
        Ok(parsed.formatted.filter(|f| !f.trim().is_empty()))
    }
}

fn decode_records(body: serde_json::Value, context: &str) -> Result<Vec<PdvRecord>, ApiError> {
    let items = expect_list(body, context)?;
    serde_json::from_value(serde_json::Value::Array(items)).map_err(|e| ApiError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
