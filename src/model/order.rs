use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ProductId;
use crate::repository::StoreRecord;

/// Type-safe identifier for orders. Strictly increasing in issuance order;
/// the next id is always derived from the persisted maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed purchase.
///
/// Created exactly once at a successful commit and immutable afterwards.
/// `total_price` is the product's unit price at the moment of commit times
/// the quantity; later price changes do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: String,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order stamped with the current time.
    pub fn new(
        id: OrderId,
        user_id: impl Into<String>,
        product_id: ProductId,
        quantity: u32,
        total_price: f64,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            product_id,
            quantity,
            total_price,
            created_at: Utc::now(),
        }
    }
}

impl StoreRecord for Order {
    type Id = OrderId;

    const SLOT: &'static str = "orders.json";

    fn id(&self) -> OrderId {
        self.id
    }
}
