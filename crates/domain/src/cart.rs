//! The typed, validated order request.

use std::num::NonZeroU32;

use common::{ProductId, RestaurantId};
use thiserror::Error;

/// Errors constructing a [`Cart`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A cart must contain at least one item.
    #[error("Cart must contain at least one item")]
    Empty,
}

/// One cart entry: a product reference and how many of it.
///
/// The quantity type makes "quantity >= 1" unrepresentable rather than
/// re-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// Creates a cart item.
    pub fn new(product_id: ProductId, quantity: NonZeroU32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A validated cart, produced by the HTTP boundary.
///
/// Construction is the only shape check the workflow relies on; the
/// placement service itself validates business existence only
/// (restaurant and products), never shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    restaurant_id: RestaurantId,
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a cart, rejecting an empty item list.
    pub fn new(restaurant_id: RestaurantId, items: Vec<CartItem>) -> Result<Self, CartError> {
        if items.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(Self {
            restaurant_id,
            items,
        })
    }

    /// The restaurant the order is placed against.
    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// The cart entries, in the order the caller listed them.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn empty_cart_is_rejected() {
        let result = Cart::new(RestaurantId::new(), vec![]);
        assert_eq!(result.unwrap_err(), CartError::Empty);
    }

    #[test]
    fn cart_preserves_item_order() {
        let first = ProductId::new();
        let second = ProductId::new();
        let cart = Cart::new(
            RestaurantId::new(),
            vec![
                CartItem::new(first, qty(2)),
                CartItem::new(second, qty(1)),
            ],
        )
        .unwrap();

        let products: Vec<_> = cart.items().iter().map(|i| i.product_id).collect();
        assert_eq!(products, vec![first, second]);
    }
}
