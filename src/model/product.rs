use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::repository::StoreRecord;

/// Type-safe identifier for products. Zero is never a valid id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry.
///
/// Created at catalog seed time or by an admin add; mutated only through
/// stock changes. The stock count never goes below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }

    /// Whether at least one unit can be sold.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl StoreRecord for Product {
    type Id = ProductId;

    const SLOT: &'static str = "products.json";

    fn id(&self) -> ProductId {
        self.id
    }

    /// The catalog is always presented ordered by id.
    fn sort(records: &mut Vec<Self>) {
        records.sort_by_key(|p| p.id);
    }
}
