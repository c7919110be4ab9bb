use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{Money, OrderId, OrderLineId, ProductId, RestaurantId};
use tokio::sync::RwLock;

use crate::records::{OrderLineRecord, OrderRecord, ProductRecord, RestaurantRecord};
use crate::store::{Store, StoreTx};
use crate::{Result, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    restaurants: HashMap<RestaurantId, RestaurantRecord>,
    products: HashMap<ProductId, ProductRecord>,
    orders: HashMap<OrderId, OrderRecord>,
    lines: HashMap<OrderLineId, OrderLineRecord>,
    fail_on_commit: bool,
    fail_on_line_insert: bool,
}

/// In-memory store implementation for testing.
///
/// Transactions stage their writes in the handle and apply them to the
/// shared state only on commit, so rollback-on-drop behaves like the
/// PostgreSQL implementation. Failure injection flags simulate transient
/// persistence failures.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of committed order headers.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns the number of committed order lines.
    pub async fn line_count(&self) -> usize {
        self.state.read().await.lines.len()
    }

    /// Configures the store to fail every commit.
    pub async fn set_fail_on_commit(&self, fail: bool) {
        self.state.write().await.fail_on_commit = fail;
    }

    /// Configures the store to fail every transactional line insert.
    pub async fn set_fail_on_line_insert(&self, fail: bool) {
        self.state.write().await.fail_on_line_insert = fail;
    }

    /// Clears all data and failure flags.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = MemoryState::default();
    }
}

#[async_trait]
impl Store for InMemoryStore {
    type Tx = InMemoryTx;

    async fn begin(&self) -> Result<Self::Tx> {
        Ok(InMemoryTx {
            state: self.state.clone(),
            staged_order: None,
            staged_lines: Vec::new(),
        })
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<(OrderRecord, Vec<OrderLineRecord>)>> {
        let state = self.state.read().await;
        let Some(order) = state.orders.get(&id).cloned() else {
            return Ok(None);
        };
        let mut lines: Vec<_> = state
            .lines
            .values()
            .filter(|l| l.order_id == id)
            .cloned()
            .collect();
        lines.sort_by_key(|l| l.id.as_uuid());
        Ok(Some((order, lines)))
    }

    async fn find_restaurant(&self, id: RestaurantId) -> Result<Option<RestaurantRecord>> {
        Ok(self.state.read().await.restaurants.get(&id).cloned())
    }

    async fn insert_restaurant(&self, restaurant: &RestaurantRecord) -> Result<()> {
        self.state
            .write()
            .await
            .restaurants
            .insert(restaurant.id, restaurant.clone());
        Ok(())
    }

    async fn insert_product(&self, product: &ProductRecord) -> Result<()> {
        self.state
            .write()
            .await
            .products
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn update_product_price(
        &self,
        id: ProductId,
        restaurant_id: RestaurantId,
        price: Money,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.products.get_mut(&id) {
            Some(product) if product.restaurant_id == restaurant_id => {
                product.price = price;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn products_for_restaurant(&self, id: RestaurantId) -> Result<Vec<ProductRecord>> {
        let state = self.state.read().await;
        let mut products: Vec<_> = state
            .products
            .values()
            .filter(|p| p.restaurant_id == id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}

/// An in-memory unit of work. Writes live here until commit.
pub struct InMemoryTx {
    state: Arc<RwLock<MemoryState>>,
    staged_order: Option<OrderRecord>,
    staged_lines: Vec<OrderLineRecord>,
}

#[async_trait]
impl StoreTx for InMemoryTx {
    async fn find_restaurant(&mut self, id: RestaurantId) -> Result<Option<RestaurantRecord>> {
        Ok(self.state.read().await.restaurants.get(&id).cloned())
    }

    async fn find_product(
        &mut self,
        id: ProductId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<ProductRecord>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .get(&id)
            .filter(|p| p.restaurant_id == restaurant_id)
            .cloned())
    }

    async fn insert_order(&mut self, order: &OrderRecord) -> Result<()> {
        self.staged_order = Some(order.clone());
        Ok(())
    }

    async fn insert_order_line(&mut self, line: &OrderLineRecord) -> Result<()> {
        if self.state.read().await.fail_on_line_insert {
            return Err(StoreError::Unavailable(
                "injected line insert failure".to_string(),
            ));
        }
        self.staged_lines.push(line.clone());
        Ok(())
    }

    async fn recompute_order_total(&mut self, order_id: OrderId) -> Result<Money> {
        let total: Money = self
            .staged_lines
            .iter()
            .filter(|l| l.order_id == order_id)
            .map(OrderLineRecord::line_total)
            .sum();

        match self.staged_order.as_mut() {
            Some(order) if order.id == order_id => {
                order.total_amount = total;
                Ok(total)
            }
            _ => Err(StoreError::Unavailable(format!(
                "order {order_id} not staged in this transaction"
            ))),
        }
    }

    async fn commit(self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_commit {
            return Err(StoreError::Unavailable(
                "injected commit failure".to_string(),
            ));
        }

        if let Some(order) = self.staged_order {
            state.orders.insert(order.id, order);
        }
        for line in self.staged_lines {
            state.lines.insert(line.id, line);
        }
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        // Staged writes are simply discarded with the handle.
        Ok(())
    }
}
