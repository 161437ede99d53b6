//! Wire types for the store-locator backend.
//!
//! Field names follow the backend's Portuguese JSON keys. Records are
//! deliberately lenient (optional fields, ids as string or number); the
//! [`crate::normalize`] module decides what is usable.

use serde::{Deserialize, Deserializer};

/// A product as returned by `/produtos/destaque` and `/produtos/buscar`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub em_destaque: Option<bool>,
    #[serde(default)]
    pub imagem_url: Option<String>,
    #[serde(default)]
    pub produto_url: Option<String>,
}

/// A point of sale as returned by both `/pdvs/proximos` endpoints.
///
/// Coordinates and distance are kept as raw JSON values because the
/// backend sends them as numbers or as numeric strings depending on the
/// data source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdvRecord {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cep: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub endereco: Option<String>,
    #[serde(default)]
    pub latitude: Option<serde_json::Value>,
    #[serde(default)]
    pub longitude: Option<serde_json::Value>,
    #[serde(default)]
    pub distancia_km: Option<serde_json::Value>,
}

/// Body of `/geocode/reverse`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub formatted: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    opt_string_or_number(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a string or number id, got null"))
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {other}"
        ))),
    }
}

/// Display text that some sources send as numbers (`"cep": 1001000`).
/// Anything that is neither becomes `None` instead of failing the record.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
