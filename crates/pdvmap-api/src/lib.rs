pub mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
pub mod proximity;
pub(crate) mod retry;
pub mod types;

pub use client::{ClientSettings, LocatorApiClient};
pub use error::ApiError;
pub use types::{PdvRecord, ProductRecord};
