//! Facade wiring the resolver, finder and catalog to one shared session.
//!
//! Each operation takes the session lock only to begin and to commit; the
//! network call in between runs unlocked, so concurrent operations overlap
//! and the generation tickets decide which outcome wins.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pdvmap_api::LocatorApiClient;
use pdvmap_core::{Coordinates, Product};

use crate::catalog::ProductCatalog;
use crate::error::{CatalogError, GeolocationFailure, LocationError, StoreLookupError};
use crate::finder::NearestStoreFinder;
use crate::map_sync::MapState;
use crate::resolver::{LocationInput, LocationResolver};
use crate::session::{Commit, SearchSession};

#[derive(Debug)]
pub struct StoreLocator {
    session: Mutex<SearchSession>,
    resolver: LocationResolver,
    finder: NearestStoreFinder,
    catalog: ProductCatalog,
}

impl StoreLocator {
    #[must_use]
    pub fn new(api: LocatorApiClient) -> Self {
        Self {
            session: Mutex::new(SearchSession::new()),
            resolver: LocationResolver::new(api.clone()),
            finder: NearestStoreFinder::new(api.clone()),
            catalog: ProductCatalog::new(api),
        }
    }

    /// A copy of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> SearchSession {
        self.session().clone()
    }

    #[must_use]
    pub fn map_state(&self) -> MapState {
        self.session().map_state()
    }

    pub fn open_location_prompt(&self) {
        self.session().open_location_prompt();
    }

    pub fn close_location_prompt(&self) {
        self.session().close_location_prompt();
    }

    /// Resolves and records a new location.
    ///
    /// Returns `Ok(Commit::Superseded)` when a newer resolution started
    /// while this one was in flight.
    ///
    /// # Errors
    ///
    /// Returns the [`LocationError`] that was recorded in the session.
    pub async fn resolve_location(&self, input: LocationInput) -> Result<Commit, LocationError> {
        let ticket = self.session().begin_location();
        let outcome = self.resolver.resolve(input).await;
        self.settle(outcome, |session, outcome| {
            session.commit_location(ticket, outcome)
        })
    }

    /// Records the result of asking the device for its position.
    ///
    /// # Errors
    ///
    /// [`LocationError::GeolocationUnavailable`] or
    /// [`LocationError::GeolocationDenied`] when the device gave no fix.
    pub async fn resolve_device_fix(
        &self,
        fix: Result<Coordinates, GeolocationFailure>,
    ) -> Result<Commit, LocationError> {
        match fix {
            Ok(at) => self.resolve_location(LocationInput::Device(at)).await,
            Err(failure) => {
                let ticket = self.session().begin_location();
                self.settle(Err(failure.into()), |session, outcome| {
                    session.commit_location(ticket, outcome)
                })
            }
        }
    }

    /// Selects `product` and looks up the nearest stores carrying it.
    ///
    /// # Errors
    ///
    /// - [`StoreLookupError::LocationRequired`] without a confirmed location; no request is made.
    /// - [`StoreLookupError::StoreLookupFailed`] when the backend lookup fails.
    pub async fn select_product(&self, product: Product) -> Result<Commit, StoreLookupError> {
        let (ticket, location) = self.session().begin_store_lookup(product.clone())?;
        let outcome = self.finder.find_nearest(&product, &location).await;
        self.settle(outcome, |session, outcome| {
            session.commit_stores(ticket, outcome)
        })
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::ProductSearchFailed`] when the backend search fails.
    pub async fn search_products(&self, term: &str) -> Result<Commit, CatalogError> {
        let Some(ticket) = self.session().begin_product_search(term) else {
            return Ok(Commit::Applied);
        };
        let outcome = self.catalog.search(term).await;
        self.settle(outcome, |session, outcome| {
            session.commit_product_search(ticket, outcome)
        })
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::FeaturedProductsUnavailable`] when the backend fails.
    pub async fn load_featured(&self) -> Result<Commit, CatalogError> {
        let ticket = self.session().begin_featured();
        let outcome = self.catalog.featured().await;
        self.settle(outcome, |session, outcome| {
            session.commit_featured(ticket, outcome)
        })
    }

    fn session(&self) -> MutexGuard<'_, SearchSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commits `outcome` and reports the error only when it was applied.
    fn settle<T, E: Clone>(
        &self,
        outcome: Result<T, E>,
        commit: impl FnOnce(&mut SearchSession, Result<T, E>) -> Commit,
    ) -> Result<Commit, E> {
        let error = outcome.as_ref().err().cloned();
        let applied = commit(&mut *self.session(), outcome);
        match (applied, error) {
            (Commit::Applied, Some(e)) => Err(e),
            (applied, _) => Ok(applied),
        }
    }
}
