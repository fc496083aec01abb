use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::error::StorageError;
use super::traits::CatalogStore;
use crate::domain::{Brand, Category, Product, ProductInList, ShoppingList, Statistic};

/// Concurrent in-memory catalog backend built on DashMap
///
/// Stands in for the relational store behind the [`CatalogStore`] seam.
/// Faithful to that store's contract in the two places the pipeline cares
/// about: brand/category inserts are *not* unique by name (each call creates
/// a fresh row), and product ids are unique (a second insert with the same
/// external id is a duplicate-key failure).
pub struct InMemoryCatalog {
    brands: DashMap<i64, Brand>,
    categories: DashMap<i64, Category>,
    products: DashMap<i64, Product>,
    shopping_lists: DashMap<i64, ShoppingList>,
    statistics: DashMap<i64, Statistic>,
    next_id: AtomicI64,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            brands: DashMap::new(),
            categories: DashMap::new(),
            products: DashMap::new(),
            shopping_lists: DashMap::new(),
            statistics: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of brand rows (including duplicates by name)
    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    /// Number of category rows (including duplicates by name)
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of persisted products
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Ids of all brand rows with the given name
    pub fn brand_ids_named(&self, name: &str) -> Vec<i64> {
        self.brands
            .iter()
            .filter(|entry| entry.value().name == name)
            .map(|entry| entry.value().id)
            .collect()
    }

    /// Ids of all category rows with the given name
    pub fn category_ids_named(&self, name: &str) -> Vec<i64> {
        self.categories
            .iter()
            .filter(|entry| entry.value().name == name)
            .map(|entry| entry.value().id)
            .collect()
    }

    /// Look up a product by its external id
    pub fn product(&self, id: i64) -> Option<Product> {
        self.products.get(&id).map(|p| p.value().clone())
    }

    /// Create an empty shopping list, returning its id
    pub fn create_shopping_list(&self, name: &str) -> i64 {
        let id = self.allocate_id();
        self.shopping_lists.insert(
            id,
            ShoppingList {
                id,
                name: name.to_string(),
                products: Vec::new(),
            },
        );
        id
    }

    /// Add a product to a shopping list
    ///
    /// A second add of the same product to the same list surfaces the
    /// duplicate-key condition, matching the relational unique constraint on
    /// list membership.
    pub fn add_product_to_list(
        &self,
        shopping_list_id: i64,
        product_id: i64,
    ) -> Result<(), StorageError> {
        let mut list = self
            .shopping_lists
            .get_mut(&shopping_list_id)
            .ok_or_else(|| StorageError::NotFound(format!("shopping list {shopping_list_id}")))?;

        if list.products.iter().any(|p| p.product_id == product_id) {
            return Err(StorageError::DuplicateKey(format!(
                "product {product_id} in shopping list {shopping_list_id}"
            )));
        }

        list.products.push(ProductInList {
            product_id,
            checked: false,
        });
        Ok(())
    }

    /// Set the checked flag on a list entry
    pub fn set_product_checked(
        &self,
        shopping_list_id: i64,
        product_id: i64,
        checked: bool,
    ) -> Result<(), StorageError> {
        let mut list = self
            .shopping_lists
            .get_mut(&shopping_list_id)
            .ok_or_else(|| StorageError::NotFound(format!("shopping list {shopping_list_id}")))?;

        let entry = list
            .products
            .iter_mut()
            .find(|p| p.product_id == product_id)
            .ok_or_else(|| {
                StorageError::NotFound(format!(
                    "product {product_id} in shopping list {shopping_list_id}"
                ))
            })?;

        entry.checked = checked;
        Ok(())
    }

    /// Read the stored aggregate for a shopping list, if one has been computed
    pub fn statistic(&self, shopping_list_id: i64) -> Option<Statistic> {
        self.statistics.get(&shopping_list_id).map(|s| *s.value())
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn create_brand(&self, name: &str) -> Result<i64, StorageError> {
        let id = self.allocate_id();
        self.brands.insert(
            id,
            Brand {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    async fn create_category(&self, name: &str) -> Result<i64, StorageError> {
        let id = self.allocate_id();
        self.categories.insert(
            id,
            Category {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    async fn create_product(&self, product: Product) -> Result<i64, StorageError> {
        let id = product.id;
        match self.products.entry(id) {
            dashmap::Entry::Occupied(_) => {
                Err(StorageError::DuplicateKey(format!("product {id}")))
            }
            dashmap::Entry::Vacant(vacant) => {
                vacant.insert(product);
                Ok(id)
            }
        }
    }

    async fn recompute_shopping_list_statistic(
        &self,
        shopping_list_id: i64,
    ) -> Result<(), StorageError> {
        let stat = {
            let list = self
                .shopping_lists
                .get(&shopping_list_id)
                .ok_or_else(|| {
                    StorageError::NotFound(format!("shopping list {shopping_list_id}"))
                })?;
            Statistic::for_list(list.value())
        };

        self.statistics.insert(shopping_list_id, stat);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, category_id: i64, brand_id: i64) -> Product {
        Product {
            id,
            name: format!("product {id}"),
            barcode: 4_600_000_000_000 + id,
            category_id,
            brand_id,
        }
    }

    #[tokio::test]
    async fn brand_inserts_are_not_deduplicated_by_name() {
        let store = InMemoryCatalog::new();

        let first = store.create_brand("acme").await.unwrap();
        let second = store.create_brand("acme").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.brand_ids_named("acme").len(), 2);
    }

    #[tokio::test]
    async fn duplicate_product_id_is_rejected() {
        let store = InMemoryCatalog::new();
        let brand = store.create_brand("acme").await.unwrap();
        let category = store.create_category("dairy").await.unwrap();

        store.create_product(product(1, category, brand)).await.unwrap();
        let err = store
            .create_product(product(1, category, brand))
            .await
            .unwrap_err();

        assert!(err.is_duplicate_key());
        assert_eq!(store.product_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_list_membership_is_rejected() {
        let store = InMemoryCatalog::new();
        let list = store.create_shopping_list("groceries");

        store.add_product_to_list(list, 10).unwrap();
        let err = store.add_product_to_list(list, 10).unwrap_err();

        assert!(err.is_duplicate_key());
    }

    #[tokio::test]
    async fn recompute_upserts_current_counts() {
        let store = InMemoryCatalog::new();
        let list = store.create_shopping_list("groceries");
        store.add_product_to_list(list, 10).unwrap();
        store.add_product_to_list(list, 11).unwrap();
        store.set_product_checked(list, 10, true).unwrap();

        store.recompute_shopping_list_statistic(list).await.unwrap();

        let stat = store.statistic(list).unwrap();
        assert_eq!(stat.products_count, 2);
        assert_eq!(stat.checked_products_count, 1);
    }

    #[tokio::test]
    async fn recompute_is_idempotent() {
        let store = InMemoryCatalog::new();
        let list = store.create_shopping_list("groceries");
        store.add_product_to_list(list, 10).unwrap();

        store.recompute_shopping_list_statistic(list).await.unwrap();
        let first = store.statistic(list).unwrap();
        store.recompute_shopping_list_statistic(list).await.unwrap();
        let second = store.statistic(list).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn recompute_for_unknown_list_fails() {
        let store = InMemoryCatalog::new();
        let err = store
            .recompute_shopping_list_statistic(999)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
