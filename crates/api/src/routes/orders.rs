//! Order placement and retrieval endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use common::OrderId;
use domain::{CatalogService, Order, OrderService};
use notify::NotificationQueue;
use serde::Serialize;
use store::Store;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validate::{PlaceOrderRequest, caller_from_headers, validate_cart};

/// Shared application state accessible from all handlers.
pub struct AppState<S: Store, Q: NotificationQueue> {
    pub orders: OrderService<S, Q>,
    pub catalog: CatalogService<S>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub price_cents: i64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub total_cents: i64,
    pub status: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub created_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let lines = order
            .lines
            .iter()
            .map(|line| OrderLineResponse {
                id: line.id.to_string(),
                product_id: line.product_id.to_string(),
                quantity: line.quantity,
                price_cents: line.price.cents(),
            })
            .collect();

        Self {
            id: order.id.to_string(),
            total_cents: order.total_amount.cents(),
            status: order.status.to_string(),
            user_id: order.user_id.to_string(),
            restaurant_id: order.restaurant_id.to_string(),
            created_at: order.created_at.to_rfc3339(),
            lines,
        }
    }
}

// -- Handlers --

/// POST /orders — place an order for the authenticated caller.
#[tracing::instrument(skip(state, headers, req))]
pub async fn place<S, Q>(
    State(state): State<Arc<AppState<S, Q>>>,
    headers: HeaderMap,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<OrderResponse>), ApiError>
where
    S: Store + 'static,
    Q: NotificationQueue + 'static,
{
    let caller = caller_from_headers(&headers)?;
    let cart = validate_cart(&req)?;

    let order = state.orders.place_order(cart, &caller).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(OrderResponse::from(order)),
    ))
}

/// GET /orders/:id — load a committed order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S, Q>(
    State(state): State<Arc<AppState<S, Q>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: Store + 'static,
    Q: NotificationQueue + 'static,
{
    let order_id = parse_order_id(&id)?;
    let order = state
        .orders
        .get_order(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(OrderResponse::from(order)))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}
