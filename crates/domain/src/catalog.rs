//! Catalog services and the read-side menu cache.
//!
//! Restaurant and product mutations live outside the order workflow, but
//! they carry the cache consistency contract the price ledger relies on:
//! any cached copy of a product is invalidated synchronously with the
//! mutation, before the mutation is acknowledged to the caller. Order
//! placement itself never reads through this cache — it resolves prices
//! transactionally — so price-snapshot integrity does not depend on
//! cache correctness.

use std::collections::HashMap;
use std::sync::Arc;

use common::{Money, ProductId, RestaurantId};
use store::{ProductRecord, RestaurantRecord, Store};
use tokio::sync::RwLock;

use crate::error::CatalogError;

/// Read-side cache of restaurant menus.
#[derive(Clone, Default)]
pub struct MenuCache {
    menus: Arc<RwLock<HashMap<RestaurantId, Vec<ProductRecord>>>>,
}

impl MenuCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached menu, if any.
    pub async fn get(&self, restaurant_id: RestaurantId) -> Option<Vec<ProductRecord>> {
        self.menus.read().await.get(&restaurant_id).cloned()
    }

    /// Stores a menu.
    pub async fn put(&self, restaurant_id: RestaurantId, products: Vec<ProductRecord>) {
        self.menus.write().await.insert(restaurant_id, products);
    }

    /// Drops the cached menu for a restaurant.
    pub async fn invalidate(&self, restaurant_id: RestaurantId) {
        self.menus.write().await.remove(&restaurant_id);
    }
}

/// Service for restaurant and product mutations plus menu reads.
pub struct CatalogService<S: Store> {
    store: S,
    cache: MenuCache,
}

impl<S: Store> CatalogService<S> {
    /// Creates a catalog service over a store and a menu cache.
    pub fn new(store: S, cache: MenuCache) -> Self {
        Self { store, cache }
    }

    /// Creates a restaurant.
    #[tracing::instrument(skip(self, name, address))]
    pub async fn create_restaurant(
        &self,
        name: String,
        address: String,
    ) -> Result<RestaurantRecord, CatalogError> {
        let restaurant = RestaurantRecord {
            id: RestaurantId::new(),
            name,
            address,
        };
        self.store.insert_restaurant(&restaurant).await?;
        Ok(restaurant)
    }

    /// Creates a product on a restaurant's menu.
    ///
    /// The cached menu is invalidated before this returns, so no reader
    /// can observe an acknowledged mutation through a stale cache.
    #[tracing::instrument(skip(self, name, description))]
    pub async fn create_product(
        &self,
        restaurant_id: RestaurantId,
        name: String,
        description: Option<String>,
        price: Money,
    ) -> Result<ProductRecord, CatalogError> {
        self.store
            .find_restaurant(restaurant_id)
            .await?
            .ok_or(CatalogError::RestaurantNotFound(restaurant_id))?;

        let product = ProductRecord {
            id: ProductId::new(),
            name,
            description,
            price,
            is_active: true,
            restaurant_id,
        };
        self.store.insert_product(&product).await?;
        self.cache.invalidate(restaurant_id).await;
        Ok(product)
    }

    /// Changes a product's current price.
    ///
    /// Committed order lines keep their snapshots; only future orders see
    /// the new price.
    #[tracing::instrument(skip(self))]
    pub async fn update_product_price(
        &self,
        restaurant_id: RestaurantId,
        product_id: ProductId,
        price: Money,
    ) -> Result<(), CatalogError> {
        let updated = self
            .store
            .update_product_price(product_id, restaurant_id, price)
            .await?;
        if !updated {
            return Err(CatalogError::ProductNotFound(product_id));
        }
        self.cache.invalidate(restaurant_id).await;
        Ok(())
    }

    /// Returns a restaurant's menu, served from the cache when warm.
    #[tracing::instrument(skip(self))]
    pub async fn menu(&self, restaurant_id: RestaurantId) -> Result<Vec<ProductRecord>, CatalogError> {
        if let Some(cached) = self.cache.get(restaurant_id).await {
            return Ok(cached);
        }

        self.store
            .find_restaurant(restaurant_id)
            .await?
            .ok_or(CatalogError::RestaurantNotFound(restaurant_id))?;

        let products = self.store.products_for_restaurant(restaurant_id).await?;
        self.cache.put(restaurant_id, products.clone()).await;
        Ok(products)
    }
}
