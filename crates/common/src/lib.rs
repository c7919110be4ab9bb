//! Shared types for the order-placement service.
//!
//! Provides typed UUID identifiers for each entity kind and the
//! fixed-point [`Money`] value object used for all price arithmetic.

pub mod ids;
pub mod money;

pub use ids::{OrderId, OrderLineId, ProductId, RestaurantId, UserId};
pub use money::Money;
