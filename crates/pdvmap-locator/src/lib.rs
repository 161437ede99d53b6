pub mod catalog;
pub mod error;
pub mod finder;
pub mod locator;
pub mod map_sync;
pub mod resolver;
pub mod session;

pub use catalog::ProductCatalog;
pub use error::{CatalogError, GeolocationFailure, LocationError, StoreLookupError};
pub use finder::{NearestStoreFinder, StoreSearch};
pub use locator::StoreLocator;
pub use map_sync::{
    ContainerSize, ListenerId, MapHost, MapState, MapSurface, MapSync, Marker, SurfaceOptions,
};
pub use resolver::{LocationInput, LocationResolver};
pub use session::{Commit, Phase, SearchSession, Ticket};
