//! Domain layer for the order-placement service.
//!
//! This crate provides the core business workflow:
//! - [`Cart`] — the typed, already-validated order request
//! - [`Order`] / [`OrderLine`] — the committed order aggregate
//! - [`OrderService`] — the transactional order placement workflow
//! - [`CatalogService`] / [`MenuCache`] — restaurant and product
//!   mutations with the read-side cache invalidation contract

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;
pub mod placement;

pub use cart::{Cart, CartError, CartItem};
pub use catalog::{CatalogService, MenuCache};
pub use error::{CatalogError, PlaceOrderError};
pub use order::{Order, OrderLine};
pub use placement::{Caller, OrderService};

pub use store::OrderStatus;
