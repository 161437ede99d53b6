//! Single-owner state for one shopper's locator session.
//!
//! Every asynchronous operation is split into `begin_*`, which records the
//! intent and hands out a [`Ticket`], and `commit_*`, which applies the
//! outcome only if no newer operation of the same kind has begun since.
//! A late result from a superseded request is dropped instead of
//! overwriting fresher state.

use pdvmap_core::{PointOfSale, Product, UserLocation, Viewport};

use crate::error::{CatalogError, LocationError, StoreLookupError};
use crate::finder::StoreSearch;
use crate::map_sync::MapState;

/// Where the shopper is in the locate-then-search flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingLocation,
    ResolvingLocation,
    AwaitingProductChoice,
    FetchingStores,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationKind {
    Location,
    Stores,
    ProductSearch,
    Featured,
}

/// Proof of which request an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: OperationKind,
    generation: u64,
}

/// Whether a `commit_*` call changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// A newer request of the same kind began; the outcome was discarded.
    Superseded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Generations {
    location: u64,
    stores: u64,
    product_search: u64,
    featured: u64,
}

impl Generations {
    fn slot(&mut self, kind: OperationKind) -> &mut u64 {
        match kind {
            OperationKind::Location => &mut self.location,
            OperationKind::Stores => &mut self.stores,
            OperationKind::ProductSearch => &mut self.product_search,
            OperationKind::Featured => &mut self.featured,
        }
    }

    fn advance(&mut self, kind: OperationKind) -> Ticket {
        let slot = self.slot(kind);
        *slot += 1;
        Ticket {
            kind,
            generation: *slot,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        let current = match ticket.kind {
            OperationKind::Location => self.location,
            OperationKind::Stores => self.stores,
            OperationKind::ProductSearch => self.product_search,
            OperationKind::Featured => self.featured,
        };
        current == ticket.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    phase: Phase,
    user_location: UserLocation,
    selected_product: Option<Product>,
    results: Vec<PointOfSale>,
    viewport: Viewport,
    location_prompt_open: bool,
    message: Option<String>,
    resolving_location: bool,
    fetching_stores: bool,
    featured: Vec<Product>,
    loading_featured: bool,
    found: Vec<Product>,
    searching_products: bool,
    generations: Generations,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    /// A fresh session: no location, prompt open, default map view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingLocation,
            user_location: UserLocation::default(),
            selected_product: None,
            results: Vec::new(),
            viewport: Viewport::default(),
            location_prompt_open: true,
            message: None,
            resolving_location: false,
            fetching_stores: false,
            featured: Vec::new(),
            loading_featured: false,
            found: Vec::new(),
            searching_products: false,
            generations: Generations::default(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn user_location(&self) -> &UserLocation {
        &self.user_location
    }

    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    #[must_use]
    pub fn results(&self) -> &[PointOfSale] {
        &self.results
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_location_prompt_open(&self) -> bool {
        self.location_prompt_open
    }

    /// The one user-facing message currently shown, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn is_resolving_location(&self) -> bool {
        self.resolving_location
    }

    #[must_use]
    pub fn is_fetching_stores(&self) -> bool {
        self.fetching_stores
    }

    #[must_use]
    pub fn featured_products(&self) -> &[Product] {
        &self.featured
    }

    #[must_use]
    pub fn is_loading_featured(&self) -> bool {
        self.loading_featured
    }

    #[must_use]
    pub fn found_products(&self) -> &[Product] {
        &self.found
    }

    #[must_use]
    pub fn is_searching_products(&self) -> bool {
        self.searching_products
    }

    /// What the map should currently show.
    #[must_use]
    pub fn map_state(&self) -> MapState {
        MapState {
            viewport: self.viewport,
            points: self.results.clone(),
            blurred: self.location_prompt_open || !self.user_location.is_confirmed(),
        }
    }

    pub fn open_location_prompt(&mut self) {
        self.location_prompt_open = true;
    }

    pub fn close_location_prompt(&mut self) {
        self.location_prompt_open = false;
    }

    /// Starts resolving a new location. Results from the previous location
    /// are cleared and any in-flight store lookup is superseded.
    pub fn begin_location(&mut self) -> Ticket {
        self.generations.advance(OperationKind::Stores);
        let ticket = self.generations.advance(OperationKind::Location);

        self.phase = Phase::ResolvingLocation;
        self.resolving_location = true;
        self.fetching_stores = false;
        self.results.clear();
        self.message = None;
        ticket
    }

    pub fn commit_location(
        &mut self,
        ticket: Ticket,
        outcome: Result<UserLocation, LocationError>,
    ) -> Commit {
        if !self.generations.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "discarding superseded location result");
            return Commit::Superseded;
        }
        self.resolving_location = false;

        match outcome {
            Ok(location) => {
                // Store lookups begun from the previous location are now stale.
                self.generations.advance(OperationKind::Stores);
                self.fetching_stores = false;
                if let Some(center) = location.coordinates {
                    self.viewport = Viewport::city(center);
                }
                self.user_location = location;
                self.selected_product = None;
                self.results.clear();
                self.location_prompt_open = false;
                self.message = None;
                self.phase = Phase::AwaitingProductChoice;
                tracing::info!(address = ?self.user_location.display_address, "location confirmed");
            }
            Err(e) => {
                self.message = Some(e.user_message());
                self.location_prompt_open = true;
                self.phase = Phase::Failed;
            }
        }
        Commit::Applied
    }

    /// Starts a store lookup for `product` from the confirmed location,
    /// returning the location to query from.
    ///
    /// # Errors
    ///
    /// Returns [`StoreLookupError::LocationRequired`] when no location has
    /// been confirmed. The prompt is reopened and the phase is unchanged.
    pub fn begin_store_lookup(
        &mut self,
        product: Product,
    ) -> Result<(Ticket, UserLocation), StoreLookupError> {
        if !self.user_location.is_confirmed() {
            let err = StoreLookupError::LocationRequired;
            self.message = Some(err.user_message());
            self.location_prompt_open = true;
            return Err(err);
        }

        let ticket = self.generations.advance(OperationKind::Stores);
        self.selected_product = Some(product);
        self.results.clear();
        self.fetching_stores = true;
        self.message = None;
        self.phase = Phase::FetchingStores;
        Ok((ticket, self.user_location.clone()))
    }

    pub fn commit_stores(
        &mut self,
        ticket: Ticket,
        outcome: Result<StoreSearch, StoreLookupError>,
    ) -> Commit {
        if !self.generations.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "discarding superseded store result");
            return Commit::Superseded;
        }
        self.fetching_stores = false;

        match outcome {
            Ok(search) => {
                self.results = search.points;
                self.viewport = search.viewport;
                self.phase = Phase::Ready;
                tracing::debug!(count = self.results.len(), "store results committed");
            }
            Err(e) => {
                if e == StoreLookupError::LocationRequired {
                    self.location_prompt_open = true;
                }
                self.message = Some(e.user_message());
                self.results.clear();
                self.phase = Phase::Failed;
            }
        }
        Commit::Applied
    }

    /// Starts a product search. Returns `None` for a blank term, which
    /// clears the result list without a request.
    pub fn begin_product_search(&mut self, term: &str) -> Option<Ticket> {
        let ticket = self.generations.advance(OperationKind::ProductSearch);
        self.found.clear();
        if term.trim().is_empty() {
            self.searching_products = false;
            return None;
        }
        self.searching_products = true;
        self.message = None;
        Some(ticket)
    }

    pub fn commit_product_search(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Product>, CatalogError>,
    ) -> Commit {
        if !self.generations.is_current(ticket) {
            return Commit::Superseded;
        }
        self.searching_products = false;
        match outcome {
            Ok(products) => self.found = products,
            Err(e) => self.message = Some(e.user_message()),
        }
        Commit::Applied
    }

    pub fn begin_featured(&mut self) -> Ticket {
        self.loading_featured = true;
        self.generations.advance(OperationKind::Featured)
    }

    pub fn commit_featured(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Product>, CatalogError>,
    ) -> Commit {
        if !self.generations.is_current(ticket) {
            return Commit::Superseded;
        }
        self.loading_featured = false;
        match outcome {
            Ok(products) => self.featured = products,
            Err(e) => self.message = Some(e.user_message()),
        }
        Commit::Applied
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
