//! Typed entity identifiers.
//!
//! Each identifier wraps a UUID to prevent mixing up references to
//! different entity kinds (an order id is not a product id, even though
//! both are UUIDs on the wire).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id! {
    /// Identifier of a user (the order owner). Users themselves live in
    /// the external auth system; the order store only records the id.
    UserId
}

entity_id! {
    /// Identifier of a restaurant.
    RestaurantId
}

entity_id! {
    /// Identifier of a product on a restaurant's menu.
    ProductId
}

entity_id! {
    /// Identifier of a placed order.
    OrderId
}

entity_id! {
    /// Identifier of a single line within an order.
    OrderLineId
}
