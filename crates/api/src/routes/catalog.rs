//! Restaurant and product endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::{Money, ProductId, RestaurantId};
use notify::NotificationQueue;
use serde::{Deserialize, Serialize};
use store::{ProductRecord, Store};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::orders::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
}

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

#[derive(Deserialize)]
pub struct UpdatePriceRequest {
    pub price_cents: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct RestaurantResponse {
    pub id: String,
    pub name: String,
    pub address: String,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub is_active: bool,
    pub restaurant_id: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price_cents: product.price.cents(),
            is_active: product.is_active,
            restaurant_id: product.restaurant_id.to_string(),
        }
    }
}

// -- Handlers --

/// POST /restaurants — create a restaurant.
#[tracing::instrument(skip(state, req))]
pub async fn create_restaurant<S, Q>(
    State(state): State<Arc<AppState<S, Q>>>,
    Json(req): Json<CreateRestaurantRequest>,
) -> Result<(axum::http::StatusCode, Json<RestaurantResponse>), ApiError>
where
    S: Store + 'static,
    Q: NotificationQueue + 'static,
{
    let restaurant = state.catalog.create_restaurant(req.name, req.address).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(RestaurantResponse {
            id: restaurant.id.to_string(),
            name: restaurant.name,
            address: restaurant.address,
        }),
    ))
}

/// POST /restaurants/:id/products — add a product to a menu.
#[tracing::instrument(skip(state, req))]
pub async fn create_product<S, Q>(
    State(state): State<Arc<AppState<S, Q>>>,
    Path(restaurant_id): Path<String>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(axum::http::StatusCode, Json<ProductResponse>), ApiError>
where
    S: Store + 'static,
    Q: NotificationQueue + 'static,
{
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    let price = validate_price(req.price_cents)?;

    let product = state
        .catalog
        .create_product(restaurant_id, req.name, req.description, price)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(ProductResponse::from(product)),
    ))
}

/// PUT /restaurants/:id/products/:product_id/price — change a price.
#[tracing::instrument(skip(state, req))]
pub async fn update_price<S, Q>(
    State(state): State<Arc<AppState<S, Q>>>,
    Path((restaurant_id, product_id)): Path<(String, String)>,
    Json(req): Json<UpdatePriceRequest>,
) -> Result<axum::http::StatusCode, ApiError>
where
    S: Store + 'static,
    Q: NotificationQueue + 'static,
{
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    let product_id = parse_product_id(&product_id)?;
    let price = validate_price(req.price_cents)?;

    state
        .catalog
        .update_product_price(restaurant_id, product_id, price)
        .await?;

    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// GET /restaurants/:id/menu — list a restaurant's products.
#[tracing::instrument(skip(state))]
pub async fn menu<S, Q>(
    State(state): State<Arc<AppState<S, Q>>>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<ProductResponse>>, ApiError>
where
    S: Store + 'static,
    Q: NotificationQueue + 'static,
{
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    let products = state.catalog.menu(restaurant_id).await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

fn validate_price(price_cents: i64) -> Result<Money, ApiError> {
    if price_cents < 0 {
        return Err(ApiError::BadRequest(
            "price_cents must not be negative".to_string(),
        ));
    }
    Ok(Money::from_cents(price_cents))
}

fn parse_restaurant_id(id: &str) -> Result<RestaurantId, ApiError> {
    let uuid = Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(RestaurantId::from_uuid(uuid))
}

fn parse_product_id(id: &str) -> Result<ProductId, ApiError> {
    let uuid = Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(ProductId::from_uuid(uuid))
}
