//! Persisted record types.
//!
//! Plain data structures mirroring the store schema. Relations are
//! expressed as typed id references, never as object graphs; the cascade
//! from orders to order lines lives in the schema's foreign key.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, OrderLineId, ProductId, RestaurantId, UserId};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Orders are created as `Pending` and are immutable after commit; no
/// further transitions exist in this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
}

impl OrderStatus {
    /// Returns the status as its persisted text form.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
        }
    }

    /// Parses the persisted text form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A restaurant row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
}

/// A product row. `price` is the current authoritative unit price; order
/// lines copy it at placement time and never read it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub is_active: bool,
    pub restaurant_id: RestaurantId,
}

/// An order header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    /// Sum of `line.price * line.quantity` over the order's lines, fixed
    /// at commit time.
    pub total_amount: Money,
    pub status: OrderStatus,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub created_at: DateTime<Utc>,
}

/// An order line row. `price` is the unit-price snapshot taken when the
/// order was placed; later product price changes never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub id: OrderLineId,
    pub quantity: u32,
    pub price: Money,
    pub order_id: OrderId,
    pub product_id: ProductId,
}

impl OrderLineRecord {
    /// Returns the line total (`price * quantity`).
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}
