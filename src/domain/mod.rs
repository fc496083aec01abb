pub mod product;
pub mod shopping_list;

// Re-export commonly used types
pub use product::{Brand, Category, Product};
pub use shopping_list::{ProductInList, ShoppingList, Statistic};
