pub mod app_config;
pub mod config;
pub mod location;
pub mod postal_code;
pub mod products;
pub mod stores;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{
    CoordinateError, Coordinates, UserLocation, Viewport, CITY_ZOOM, CLOSE_ZOOM, DEFAULT_CENTER,
};
pub use postal_code::{PostalCode, PostalCodeError};
pub use products::Product;
pub use stores::PointOfSale;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
