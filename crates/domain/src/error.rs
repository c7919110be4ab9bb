//! Domain error types.

use common::{ProductId, RestaurantId};
use store::StoreError;
use thiserror::Error;

/// Errors from the order placement workflow.
///
/// The not-found variants are client-caused and carry the offending
/// reference; `Store` covers transient and fatal persistence failures.
/// None of them are retried here — retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The cart's restaurant does not exist.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// A cart entry references a product that does not exist under the
    /// cart's restaurant.
    #[error("Product {0} not found in this restaurant")]
    ProductNotFound(ProductId),

    /// The store failed; the transaction was rolled back.
    #[error("Persistence failure: {0}")]
    Store(#[from] StoreError),
}

/// Errors from restaurant/product catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The target restaurant does not exist.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// The target product does not exist under that restaurant.
    #[error("Product {0} not found in this restaurant")]
    ProductNotFound(ProductId),

    /// The store failed.
    #[error("Persistence failure: {0}")]
    Store(#[from] StoreError),
}
