use serde::{Deserialize, Serialize};

use crate::location::Coordinates;

/// A physical point of sale (PDV) returned by the proximity endpoints.
///
/// Result sets arrive ranked by ascending `distance_km`; that order is a
/// backend contract and is never re-sorted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfSale {
    pub id: String,
    pub name: String,
    /// CEP of the store, as the backend formats it.
    pub postal_code: String,
    pub address: String,
    pub coordinates: Coordinates,
    /// Distance from the query origin, never negative.
    pub distance_km: f64,
}

impl PointOfSale {
    /// Popup body shown on the map marker for this store.
    #[must_use]
    pub fn popup_text(&self) -> String {
        format!(
            "{}\n{}\nDistância: {} km",
            self.name, self.address, self.distance_km
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_text_lists_name_address_and_distance() {
        let pdv = PointOfSale {
            id: "7".to_string(),
            name: "Mercado Central".to_string(),
            postal_code: "89201-100".to_string(),
            address: "Rua do Príncipe, 100".to_string(),
            coordinates: Coordinates::new(-48.84, -26.30).unwrap(),
            distance_km: 1.2,
        };
        assert_eq!(
            pdv.popup_text(),
            "Mercado Central\nRua do Príncipe, 100\nDistância: 1.2 km"
        );
    }
}
