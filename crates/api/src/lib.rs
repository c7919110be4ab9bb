//! HTTP API server for the order-placement service.
//!
//! Wires the domain services behind axum routes with structured logging
//! (tracing) and Prometheus metrics. All shape validation happens at
//! this boundary; the domain receives typed, validated input.

pub mod config;
pub mod error;
pub mod routes;
pub mod validate;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use domain::{CatalogService, MenuCache, OrderService};
use metrics_exporter_prometheus::PrometheusHandle;
use notify::NotificationQueue;
use store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, Q>(state: Arc<AppState<S, Q>>, metrics_handle: PrometheusHandle) -> Router
where
    S: Store + 'static,
    Q: NotificationQueue + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::place::<S, Q>))
        .route("/orders/{id}", get(routes::orders::get::<S, Q>))
        .route(
            "/restaurants",
            post(routes::catalog::create_restaurant::<S, Q>),
        )
        .route(
            "/restaurants/{id}/products",
            post(routes::catalog::create_product::<S, Q>),
        )
        .route(
            "/restaurants/{id}/products/{product_id}/price",
            put(routes::catalog::update_price::<S, Q>),
        )
        .route(
            "/restaurants/{id}/menu",
            get(routes::catalog::menu::<S, Q>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the shared application state over a store and a queue.
pub fn create_state<S, Q>(store: S, queue: Q) -> Arc<AppState<S, Q>>
where
    S: Store + Clone + 'static,
    Q: NotificationQueue + 'static,
{
    Arc::new(AppState {
        orders: OrderService::new(store.clone(), queue),
        catalog: CatalogService::new(store, MenuCache::new()),
    })
}
