//! The committed order aggregate as returned to callers.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, OrderLineId, ProductId, RestaurantId, UserId};
use serde::Serialize;
use store::{OrderLineRecord, OrderRecord, OrderStatus};

/// A line of a committed order.
///
/// `price` is the unit-price snapshot taken when the order was placed;
/// it never changes afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Money,
}

impl OrderLine {
    /// Returns the line total (`price * quantity`).
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

impl From<OrderLineRecord> for OrderLine {
    fn from(record: OrderLineRecord) -> Self {
        Self {
            id: record.id,
            product_id: record.product_id,
            quantity: record.quantity,
            price: record.price,
        }
    }
}

/// A fully-populated committed order.
///
/// Only the transactional writer creates these; once returned, the order
/// is immutable and `total_amount` is never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Assembles an order from its store records.
    pub fn from_records(header: OrderRecord, lines: Vec<OrderLineRecord>) -> Self {
        Self {
            id: header.id,
            total_amount: header.total_amount,
            status: header.status,
            user_id: header.user_id,
            restaurant_id: header.restaurant_id,
            created_at: header.created_at,
            lines: lines.into_iter().map(OrderLine::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_records_keeps_totals_and_lines() {
        let header = OrderRecord {
            id: OrderId::new(),
            total_amount: Money::from_cents(1350),
            status: OrderStatus::Pending,
            user_id: UserId::new(),
            restaurant_id: RestaurantId::new(),
            created_at: Utc::now(),
        };
        let line = OrderLineRecord {
            id: OrderLineId::new(),
            quantity: 2,
            price: Money::from_cents(500),
            order_id: header.id,
            product_id: ProductId::new(),
        };

        let order = Order::from_records(header.clone(), vec![line]);
        assert_eq!(order.total_amount, Money::from_cents(1350));
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].line_total(), Money::from_cents(1000));
    }
}
