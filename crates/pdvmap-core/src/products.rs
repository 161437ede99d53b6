use serde::{Deserialize, Serialize};

/// A catalog product the user can look up in nearby stores.
///
/// Identity is `id`; every other field is presentation data sourced
/// read-only from the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, kept as a string to match the backend's query key.
    pub id: String,
    pub name: String,
    /// Package size as displayed, e.g. `"1 L"`.
    pub volume: String,
    /// Highlighted ("NOVO") in the featured list.
    pub is_featured: bool,
    pub image_url: String,
    /// Product page on the brand site, when one exists.
    pub detail_url: Option<String>,
}

impl Product {
    /// Short label for logs and CLI output, e.g. `"Leite Integral (1 L)"`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.volume.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.volume)
        }
    }
}
