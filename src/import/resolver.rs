use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::storage::{CatalogStore, StorageError};

/// Sentinel label substituted for a blank brand name
pub const UNKNOWN_BRAND: &str = "unknown brand";

/// Sentinel label substituted for a blank category name
pub const UNKNOWN_CATEGORY: &str = "unknown category";

/// The two reference-entity kinds the catalog file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Brand,
    Category,
}

impl ReferenceKind {
    fn sentinel(self) -> &'static str {
        match self {
            ReferenceKind::Brand => UNKNOWN_BRAND,
            ReferenceKind::Category => UNKNOWN_CATEGORY,
        }
    }
}

/// Deduplicating resolver from reference-entity name to store identifier
///
/// The store's `create_brand`/`create_category` calls have no uniqueness
/// guarantee, so a bare read-if-absent-then-create per worker would race and
/// create duplicate rows. This resolver funnels every resolution through one
/// mutation-guarded cache per kind: the guard is held across the store
/// create, so each distinct name is created at most once per run, and all
/// workers observe the same identifier for it.
pub struct ReferenceResolver<S> {
    store: Arc<S>,
    brands: Mutex<HashMap<String, i64>>,
    categories: Mutex<HashMap<String, i64>>,
}

impl<S: CatalogStore> ReferenceResolver<S> {
    /// Create a resolver with empty caches
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            brands: Mutex::new(HashMap::new()),
            categories: Mutex::new(HashMap::new()),
        }
    }

    /// The store this resolver creates reference rows in
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Resolve a name to a stable identifier, creating the row on first sight
    ///
    /// Blank or whitespace-only names resolve to the sentinel label for the
    /// kind, so every such row shares one identifier.
    pub async fn resolve(&self, kind: ReferenceKind, name: &str) -> Result<i64, StorageError> {
        let name = match name.trim() {
            "" => kind.sentinel(),
            trimmed => trimmed,
        };

        let cache = match kind {
            ReferenceKind::Brand => &self.brands,
            ReferenceKind::Category => &self.categories,
        };

        // Hold the guard across the create call: serializing creation is what
        // keeps a racing sibling worker from inserting the same name twice.
        let mut cache = cache.lock().await;
        if let Some(id) = cache.get(name) {
            return Ok(*id);
        }

        let id = match kind {
            ReferenceKind::Brand => self.store.create_brand(name).await?,
            ReferenceKind::Category => self.store.create_category(name).await?,
        };
        debug!(?kind, name, id, "created reference row");
        cache.insert(name.to_string(), id);
        Ok(id)
    }
}
