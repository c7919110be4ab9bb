//! The transactional order placement workflow.
//!
//! One call = one unit of work: restaurant check, header insert,
//! per-line price resolution and insert, total recompute, commit. The
//! confirmation notification is enqueued strictly after the commit and
//! never participates in the transaction.

use chrono::Utc;
use common::{Money, OrderId, OrderLineId, UserId};
use notify::{NotificationJob, NotificationQueue};
use store::{OrderLineRecord, OrderRecord, OrderStatus, Store, StoreTx};

use crate::cart::Cart;
use crate::error::PlaceOrderError;
use crate::order::Order;

/// The authenticated caller placing the order.
///
/// Authentication itself happens outside this core; by the time a cart
/// reaches the workflow, identity is already established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub email: String,
}

/// Service running the order placement workflow.
///
/// Holds the store and queue handles explicitly; there is no ambient
/// registry. The store session used by one call is exclusively owned by
/// that call and released on every exit path (commit, error return, or
/// drop).
pub struct OrderService<S: Store, Q: NotificationQueue> {
    store: S,
    queue: Q,
}

impl<S: Store, Q: NotificationQueue> OrderService<S, Q> {
    /// Creates a new order service over a store and a notification queue.
    pub fn new(store: S, queue: Q) -> Self {
        Self { store, queue }
    }

    /// Places an order for a validated cart.
    ///
    /// On success the returned order is fully committed: the commit
    /// boundary is the single source of truth for whether the order
    /// happened. A failed notification enqueue does not unwind it.
    #[tracing::instrument(skip(self, cart, caller), fields(restaurant_id = %cart.restaurant_id()))]
    pub async fn place_order(&self, cart: Cart, caller: &Caller) -> Result<Order, PlaceOrderError> {
        let mut tx = self.store.begin().await?;

        let order = match write_order(&mut tx, &cart, caller).await {
            Ok(order) => order,
            Err(error) => {
                // Rollback failures are secondary to the original error;
                // dropping the handle would discard the work anyway.
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(%rollback_error, "rollback failed");
                }
                metrics::counter!("orders_failed_total").increment(1);
                return Err(error);
            }
        };

        tx.commit().await.inspect_err(|_| {
            metrics::counter!("orders_failed_total").increment(1);
        })?;

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.id, total = %order.total_amount, "order placed");

        let job =
            NotificationJob::confirmation_email(&*caller.email, order.id, order.total_amount);
        if let Err(error) = self.queue.enqueue(job).await {
            // The order is already durable; the notification is the only
            // casualty and the caller still gets a success.
            metrics::counter!("order_notifications_failed_total").increment(1);
            tracing::warn!(order_id = %order.id, %error, "confirmation enqueue failed");
        }

        Ok(order)
    }

    /// Loads a committed order.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Option<Order>, PlaceOrderError> {
        let Some((header, lines)) = self.store.get_order(id).await? else {
            return Ok(None);
        };
        Ok(Some(Order::from_records(header, lines)))
    }
}

/// Builds and stages the order aggregate inside the open transaction.
///
/// Processing stops at the first unresolvable entity; the caller rolls
/// back, so no partial state survives.
async fn write_order<T: StoreTx>(
    tx: &mut T,
    cart: &Cart,
    caller: &Caller,
) -> Result<Order, PlaceOrderError> {
    tx.find_restaurant(cart.restaurant_id())
        .await?
        .ok_or(PlaceOrderError::RestaurantNotFound(cart.restaurant_id()))?;

    // Header goes in first so the lines have an id to reference.
    let header = OrderRecord {
        id: OrderId::new(),
        total_amount: Money::zero(),
        status: OrderStatus::Pending,
        user_id: caller.user_id,
        restaurant_id: cart.restaurant_id(),
        created_at: Utc::now(),
    };
    tx.insert_order(&header).await?;

    let mut lines = Vec::with_capacity(cart.items().len());
    for item in cart.items() {
        let product = tx
            .find_product(item.product_id, cart.restaurant_id())
            .await?
            .ok_or(PlaceOrderError::ProductNotFound(item.product_id))?;

        let line = OrderLineRecord {
            id: OrderLineId::new(),
            quantity: item.quantity.get(),
            // Price snapshot: copied now, never re-read.
            price: product.price,
            order_id: header.id,
            product_id: product.id,
        };
        tx.insert_order_line(&line).await?;
        lines.push(line);
    }

    // The stored total comes from the staged rows, not from anything the
    // caller supplied.
    let total = tx.recompute_order_total(header.id).await?;

    Ok(Order::from_records(
        OrderRecord {
            total_amount: total,
            ..header
        },
        lines,
    ))
}
