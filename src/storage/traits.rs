use async_trait::async_trait;

use super::error::StorageError;
use crate::domain::Product;

/// The persistent-store seam consumed by the import pipeline and the
/// statistics updater.
///
/// Implementations must be safe for concurrent use by many workers; the
/// backend is expected to serialize or pool its underlying connections.
/// Note that `create_brand` and `create_category` carry no uniqueness
/// guarantee: every call inserts a new row. Deduplication is the job of
/// the [`ReferenceResolver`](crate::import::ReferenceResolver) in front of
/// this trait.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a brand row, returning its identifier
    async fn create_brand(&self, name: &str) -> Result<i64, StorageError>;

    /// Insert a category row, returning its identifier
    async fn create_category(&self, name: &str) -> Result<i64, StorageError>;

    /// Insert a product row, returning its identifier
    ///
    /// Fails with [`StorageError::DuplicateKey`] when a product with the
    /// same external id already exists.
    async fn create_product(&self, product: Product) -> Result<i64, StorageError>;

    /// Recompute and upsert the aggregate statistic for one shopping list
    ///
    /// Idempotent: repeated invocation with no intervening list change
    /// yields the same stored aggregate.
    async fn recompute_shopping_list_statistic(
        &self,
        shopping_list_id: i64,
    ) -> Result<(), StorageError>;
}
