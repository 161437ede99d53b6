//! Normalization of backend wire records into `pdvmap-core` domain types.

use pdvmap_core::{Coordinates, PointOfSale, Product};

use crate::types::{PdvRecord, ProductRecord};

/// Parses a coordinate or distance sent either as a JSON number or as a
/// numeric string. Leading/trailing whitespace is ignored.
#[must_use]
pub fn parse_number(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Extracts placeable coordinates from a record.
///
/// Missing, null, unparsable, out-of-range and exactly-zero values all count
/// as "no coordinates": the backend uses `0` as a placeholder for records it
/// failed to geocode.
#[must_use]
pub fn record_coordinates(record: &PdvRecord) -> Option<Coordinates> {
    let lat = record.latitude.as_ref().and_then(parse_number)?;
    let lon = record.longitude.as_ref().and_then(parse_number)?;
    if lat.abs() < f64::EPSILON || lon.abs() < f64::EPSILON {
        return None;
    }
    Coordinates::new(lon, lat).ok()
}

#[must_use]
pub fn normalize_product(record: ProductRecord) -> Product {
    Product {
        id: record.id,
        name: record.nome,
        volume: record.volume.unwrap_or_default(),
        is_featured: record.em_destaque.unwrap_or(false),
        image_url: record.imagem_url.unwrap_or_default(),
        detail_url: record.produto_url.filter(|u| !u.trim().is_empty()),
    }
}

/// Converts a ranked PDV record into a [`PointOfSale`].
///
/// # Errors
///
/// Returns a description of the first unusable field: missing id or name,
/// no placeable coordinates, or a missing/negative distance.
pub fn normalize_point_of_sale(record: PdvRecord) -> Result<PointOfSale, String> {
    let coordinates =
        record_coordinates(&record).ok_or_else(|| "missing or invalid coordinates".to_string())?;
    let distance_km = record
        .distancia_km
        .as_ref()
        .and_then(parse_number)
        .ok_or_else(|| "missing distancia_km".to_string())?;
    if distance_km < 0.0 {
        return Err(format!("negative distancia_km {distance_km}"));
    }
    let id = record.id.ok_or_else(|| "missing id".to_string())?;
    let name = record
        .nome
        .ok_or_else(|| format!("point of sale {id} has no nome"))?;

    Ok(PointOfSale {
        id,
        name,
        postal_code: record.cep.unwrap_or_default(),
        address: record.endereco.unwrap_or_default(),
        coordinates,
        distance_km,
    })
}
