use async_trait::async_trait;
use common::{Money, OrderId, ProductId, RestaurantId};

use crate::records::{OrderLineRecord, OrderRecord, ProductRecord, RestaurantRecord};
use crate::Result;

/// Core trait for store implementations.
///
/// All implementations must be thread-safe (Send + Sync). The methods on
/// the store itself run as single auto-committed operations; multi-entity
/// writes go through a transaction obtained from [`Store::begin`].
#[async_trait]
pub trait Store: Send + Sync {
    /// The transaction handle type produced by [`Store::begin`].
    type Tx: StoreTx;

    /// Opens a transaction.
    ///
    /// The handle exclusively owns its connection for the duration of the
    /// unit of work. Dropping it without calling
    /// [`StoreTx::commit`] rolls everything back and releases the
    /// connection, so every exit path is covered.
    async fn begin(&self) -> Result<Self::Tx>;

    /// Loads a committed order header together with its lines.
    ///
    /// Returns None if no such order exists.
    async fn get_order(&self, id: OrderId) -> Result<Option<(OrderRecord, Vec<OrderLineRecord>)>>;

    /// Looks up a restaurant outside any transaction.
    async fn find_restaurant(&self, id: RestaurantId) -> Result<Option<RestaurantRecord>>;

    /// Inserts a restaurant.
    async fn insert_restaurant(&self, restaurant: &RestaurantRecord) -> Result<()>;

    /// Inserts a product.
    async fn insert_product(&self, product: &ProductRecord) -> Result<()>;

    /// Updates a product's current price. Returns false if the product
    /// does not exist under that restaurant.
    async fn update_product_price(
        &self,
        id: ProductId,
        restaurant_id: RestaurantId,
        price: Money,
    ) -> Result<bool>;

    /// Lists the products of a restaurant.
    async fn products_for_restaurant(&self, id: RestaurantId) -> Result<Vec<ProductRecord>>;
}

/// A unit of work against the store.
///
/// Writes staged through this handle become visible to other callers only
/// after [`StoreTx::commit`]; reads observe the handle's own staged
/// writes plus previously committed state.
#[async_trait]
pub trait StoreTx: Send {
    /// Looks up a restaurant inside the transaction.
    async fn find_restaurant(&mut self, id: RestaurantId) -> Result<Option<RestaurantRecord>>;

    /// Looks up a product scoped to a restaurant inside the transaction.
    ///
    /// This is the price-ledger read: the price returned is the one the
    /// order line will snapshot. Implementations must guarantee the value
    /// stays consistent with the rest of the unit of work (the Postgres
    /// implementation takes a share lock on the product row).
    async fn find_product(
        &mut self,
        id: ProductId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<ProductRecord>>;

    /// Inserts an order header.
    async fn insert_order(&mut self, order: &OrderRecord) -> Result<()>;

    /// Inserts an order line referencing an already-inserted header.
    async fn insert_order_line(&mut self, line: &OrderLineRecord) -> Result<()>;

    /// Recomputes the order total from the lines actually staged in this
    /// transaction, stores it on the header, and returns it.
    ///
    /// Computing from the inserted rows rather than from caller-supplied
    /// numbers is what makes the stored total trustworthy.
    async fn recompute_order_total(&mut self, order_id: OrderId) -> Result<Money>;

    /// Commits the unit of work, making all staged writes durable.
    async fn commit(self) -> Result<()>;

    /// Explicitly rolls back the unit of work. Dropping the handle has
    /// the same effect.
    async fn rollback(self) -> Result<()>;
}
