use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Client;
use routine_model::{Catalog, CatalogItem};

use crate::{CatalogError, CatalogSource, RequestTokens, filter};

/// Loads the catalog and answers filter changes from the front end.
///
/// The catalog is cached after the first successful load, so products
/// added to the source mid-session are only picked up after
/// [`CatalogBrowser::refresh`].
///
/// Filter requests may overlap: a second filter change can be issued
/// while the first one is still waiting for the catalog. Each call to
/// [`CatalogBrowser::apply_filters`] takes a request token, and only the
/// newest call gets a result; older calls return `Ok(None)`.
#[derive(Debug)]
pub struct CatalogBrowser {
    source: CatalogSource,
    client: Client,
    cached: Mutex<Option<Arc<Catalog>>>,
    tokens: RequestTokens,
}

impl CatalogBrowser {
    /// Creates a browser over `source`. Nothing is fetched yet.
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            client: Client::new(),
            cached: Mutex::new(None),
            tokens: RequestTokens::default(),
        }
    }

    /// Returns the source this browser loads from.
    #[inline]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Returns the catalog, loading it on first use.
    pub async fn catalog(&self) -> Result<Arc<Catalog>, CatalogError> {
        if let Some(catalog) = self.cached_catalog() {
            return Ok(catalog);
        }

        let catalog = Arc::new(self.source.load(&self.client).await?);
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drops the cached catalog so the next access re-fetches it.
    pub fn refresh(&self) {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Returns the products matching `category` and `search_term`.
    ///
    /// See [`filter`](crate::filter) for the matching rules. Returns
    /// `Ok(None)` if another call started while this one was loading the
    /// catalog; its result would be stale. Errors of superseded calls
    /// are dropped the same way.
    pub async fn apply_filters(
        &self,
        category: &str,
        search_term: &str,
    ) -> Result<Option<Vec<CatalogItem>>, CatalogError> {
        let token = self.tokens.begin();
        let result = self.catalog().await;
        if !self.tokens.is_current(token) {
            debug!("discarding stale catalog response {token:?}");
            return Ok(None);
        }

        let catalog = result?;
        let items = filter(catalog.products(), category, search_term)
            .into_iter()
            .cloned()
            .collect();
        Ok(Some(items))
    }

    fn cached_catalog(&self) -> Option<Arc<Catalog>> {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
