use serde::{Deserialize, Serialize};

/// A product's membership in a shopping list, with its checked-off flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInList {
    pub product_id: i64,
    pub checked: bool,
}

/// A user's shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub products: Vec<ProductInList>,
}

/// Aggregate statistics for one shopping list, recomputed from scratch on
/// every change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub shopping_list_id: i64,
    pub products_count: usize,
    pub checked_products_count: usize,
}

impl Statistic {
    /// Recompute the aggregate from the list's current product set.
    ///
    /// Pure and deterministic, so the store-level upsert built on top of it
    /// is idempotent: recomputing twice with no intervening change yields the
    /// same row both times.
    pub fn for_list(list: &ShoppingList) -> Self {
        Self {
            shopping_list_id: list.id,
            products_count: list.products.len(),
            checked_products_count: list.products.iter().filter(|p| p.checked).count(),
        }
    }
}
