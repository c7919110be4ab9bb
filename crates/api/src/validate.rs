//! Boundary validation.
//!
//! Shape validation happens here, once, producing the typed structures
//! the domain consumes. The workflow behind this boundary checks
//! business existence only, never shape.

use std::num::NonZeroU32;

use axum::http::HeaderMap;
use common::{ProductId, RestaurantId, UserId};
use domain::{Caller, Cart, CartItem};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /orders` request body.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub restaurant_id: String,
    pub items: Vec<PlaceOrderItem>,
}

/// One cart entry as submitted by the client.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderItem {
    pub product_id: String,
    pub quantity: u32,
}

fn parse_uuid(value: &str, field: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|e| ApiError::BadRequest(format!("Invalid {field}: {e}")))
}

/// Validates a place-order request into a typed [`Cart`].
pub fn validate_cart(req: &PlaceOrderRequest) -> Result<Cart, ApiError> {
    let restaurant_id = RestaurantId::from_uuid(parse_uuid(&req.restaurant_id, "restaurant_id")?);

    let mut items = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let product_id = ProductId::from_uuid(parse_uuid(&item.product_id, "product_id")?);
        let quantity = NonZeroU32::new(item.quantity).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Invalid quantity for product {}: must be at least 1",
                item.product_id
            ))
        })?;
        items.push(CartItem::new(product_id, quantity));
    }

    Cart::new(restaurant_id, items)
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Extracts the authenticated caller from request headers.
///
/// Token verification is the gateway's job; by the time a request gets
/// here, `x-user-id` and `x-user-email` carry the verified identity.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<Caller, ApiError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("Missing x-user-id header".to_string()))?;
    let email = headers
        .get("x-user-email")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("Missing x-user-email header".to_string()))?;

    Ok(Caller {
        user_id: UserId::from_uuid(parse_uuid(user_id, "x-user-id")?),
        email: email.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(restaurant_id: &str, items: Vec<(String, u32)>) -> PlaceOrderRequest {
        PlaceOrderRequest {
            restaurant_id: restaurant_id.to_string(),
            items: items
                .into_iter()
                .map(|(product_id, quantity)| PlaceOrderItem {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        let req = request(
            &Uuid::new_v4().to_string(),
            vec![(Uuid::new_v4().to_string(), 2)],
        );
        let cart = validate_cart(&req).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity.get(), 2);
    }

    #[test]
    fn rejects_malformed_restaurant_id() {
        let req = request("not-a-uuid", vec![(Uuid::new_v4().to_string(), 1)]);
        assert!(matches!(
            validate_cart(&req),
            Err(ApiError::BadRequest(msg)) if msg.contains("restaurant_id")
        ));
    }

    #[test]
    fn rejects_zero_quantity() {
        let req = request(
            &Uuid::new_v4().to_string(),
            vec![(Uuid::new_v4().to_string(), 0)],
        );
        assert!(matches!(
            validate_cart(&req),
            Err(ApiError::BadRequest(msg)) if msg.contains("quantity")
        ));
    }

    #[test]
    fn rejects_empty_item_list() {
        let req = request(&Uuid::new_v4().to_string(), vec![]);
        assert!(matches!(validate_cart(&req), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn caller_requires_both_headers() {
        let mut headers = HeaderMap::new();
        assert!(caller_from_headers(&headers).is_err());

        headers.insert("x-user-id", Uuid::new_v4().to_string().parse().unwrap());
        assert!(caller_from_headers(&headers).is_err());

        headers.insert("x-user-email", "ada@example.com".parse().unwrap());
        let caller = caller_from_headers(&headers).unwrap();
        assert_eq!(caller.email, "ada@example.com");
    }
}
