//! Prelude module for convenient imports
//!
//! Import everything you need with: `use catalog::prelude::*;`

// Domain types
pub use crate::domain::{Brand, Category, Product, ProductInList, ShoppingList, Statistic};

// Storage types
pub use crate::storage::{CatalogStore, InMemoryCatalog, StorageError};

// IO types
pub use crate::io::{IoError, RawLine, TsvLineStream};

// Import pipeline types
pub use crate::import::{
    ImportError, ImportPipeline, ImportSummary, ReferenceKind, ReferenceResolver,
};

// Listener types
pub use crate::listener::{ChangeEvent, ChangeNotifier, StatisticsUpdater};

// App types
pub use crate::app::{AppError, CliApp, CliConfig};
