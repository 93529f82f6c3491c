//! # Catalog Store
//!
//! Read-only product catalog with replay caching and a shared search term.
//!
//! ## Cache Flow
//! ```text
//! list_products / find_by_id / list_categories / search
//!       │
//!       ▼
//! ┌───────────────┐ hit  ┌──────────────────────────┐
//! │ read lock     │ ───► │ Arc<Vec<Product>> clone  │
//! └───────┬───────┘      └──────────────────────────┘
//!         │ miss                     ▲
//!         ▼                          │
//! ┌───────────────┐ hit (someone     │
//! │ write lock    │ ─ else loaded) ──┘
//! └───────┬───────┘                  │
//!         │ miss                     │
//!         ▼                          │
//! ┌───────────────┐  Ok: cache it    │
//! │ fixture.load  │ ─────────────────┘
//! └───────┬───────┘
//!         │ Err: returned, nothing cached
//!         ▼
//! ```
//!
//! The write lock is held across the fetch, so concurrent first callers
//! wait for one load instead of starting their own.

use std::collections::BTreeSet;
use std::sync::Arc;

use storefront_core::validation::validate_search_term;
use storefront_core::Product;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info};

use crate::error::ClientResult;
use crate::fixture::FixtureSource;

/// Narrows a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Search term. `None` uses the store's current term.
    pub term: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

pub struct CatalogStore {
    fixture: Arc<dyn FixtureSource>,
    products: RwLock<Option<Arc<Vec<Product>>>>,
    search_tx: watch::Sender<String>,
}

impl CatalogStore {
    pub fn new(fixture: Arc<dyn FixtureSource>) -> Self {
        let (search_tx, _) = watch::channel(String::new());
        CatalogStore {
            fixture,
            products: RwLock::new(None),
            search_tx,
        }
    }

    /// The full catalog. The first successful load is replayed to every
    /// later caller until [`invalidate`](Self::invalidate).
    pub async fn list_products(&self) -> ClientResult<Arc<Vec<Product>>> {
        if let Some(products) = self.products.read().await.as_ref() {
            debug!("Catalog cache hit");
            return Ok(products.clone());
        }

        let mut guard = self.products.write().await;
        if let Some(products) = guard.as_ref() {
            return Ok(products.clone());
        }

        let fixture = self.fixture.load().await?;
        let products = Arc::new(fixture.products);
        *guard = Some(products.clone());

        info!(
            source = %self.fixture.describe(),
            count = products.len(),
            "Catalog loaded"
        );
        Ok(products)
    }

    /// One product by id. `Ok(None)` when the catalog has no such id.
    pub async fn find_by_id(&self, id: i64) -> ClientResult<Option<Product>> {
        let products = self.list_products().await?;
        let found = products.iter().find(|p| p.id == id).cloned();
        debug!(product_id = id, found = found.is_some(), "Product lookup");
        Ok(found)
    }

    /// Distinct, sorted categories. Products without a category are skipped.
    pub async fn list_categories(&self) -> ClientResult<BTreeSet<String>> {
        let products = self.list_products().await?;
        Ok(products
            .iter()
            .filter(|p| !p.category.is_empty())
            .map(|p| p.category.clone())
            .collect())
    }

    /// Products matching the filter, in catalog order.
    pub async fn search(&self, filter: &ProductFilter) -> ClientResult<Vec<Product>> {
        let term = match &filter.term {
            Some(term) => validate_search_term(term)?,
            None => self.search_term(),
        };
        let needle = term.to_lowercase();

        let products = self.list_products().await?;
        Ok(products
            .iter()
            .filter(|p| match &filter.category {
                Some(category) => &p.category == category,
                None => true,
            })
            .filter(|p| p.matches_search(&needle))
            .cloned()
            .collect())
    }

    /// Drops the cached catalog; the next read fetches again.
    pub async fn invalidate(&self) {
        *self.products.write().await = None;
        debug!("Catalog cache invalidated");
    }

    // =========================================================================
    // Search Term
    // =========================================================================

    /// Publishes a new search term to every subscriber.
    pub fn set_search_term(&self, term: &str) -> ClientResult<()> {
        let term = validate_search_term(term)?;
        debug!(term = %term, "Search term updated");
        self.search_tx.send_replace(term);
        Ok(())
    }

    /// The latest search term. Empty until one is set.
    pub fn search_term(&self) -> String {
        self.search_tx.borrow().clone()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<String> {
        self.search_tx.subscribe()
    }
}
