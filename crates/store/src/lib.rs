//! Store layer for the order-placement service.
//!
//! Exposes the [`Store`] and [`StoreTx`] traits (the transactional
//! interface the order workflow runs against) together with two
//! implementations: [`PostgresStore`] for production and
//! [`InMemoryStore`] for tests.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod records;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use records::{OrderLineRecord, OrderRecord, OrderStatus, ProductRecord, RestaurantRecord};
pub use store::{Store, StoreTx};
