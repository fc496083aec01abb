use serde::{Deserialize, Serialize};

/// A reference entity: product category row referenced by foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A reference entity: brand row referenced by foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

/// A catalog product as persisted by the import pipeline
///
/// `id` is the external identifier carried by the input file, `barcode` the
/// numeric UPC/EAN code. `category_id` and `brand_id` must reference rows
/// that exist in the store before the product insert is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub barcode: i64,
    pub category_id: i64,
    pub brand_id: i64,
}
