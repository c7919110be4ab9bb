//! End-to-end placement workflow tests against the in-memory store.

use std::num::NonZeroU32;
use std::sync::Arc;

use common::{Money, ProductId, RestaurantId, UserId};
use domain::{Caller, Cart, CartItem, CatalogService, MenuCache, OrderService, PlaceOrderError};
use notify::{InMemoryQueue, RecordingEmailSender, Worker};
use store::{InMemoryStore, ProductRecord, RestaurantRecord, Store};

fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

fn caller() -> Caller {
    Caller {
        user_id: UserId::new(),
        email: "ada@example.com".to_string(),
    }
}

async fn seed_restaurant(store: &InMemoryStore) -> RestaurantId {
    let restaurant = RestaurantRecord {
        id: RestaurantId::new(),
        name: "Trattoria".to_string(),
        address: "1 Via Roma".to_string(),
    };
    store.insert_restaurant(&restaurant).await.unwrap();
    restaurant.id
}

async fn seed_product(store: &InMemoryStore, restaurant_id: RestaurantId, cents: i64) -> ProductId {
    let product = ProductRecord {
        id: ProductId::new(),
        name: format!("Dish at {cents}"),
        description: None,
        price: Money::from_cents(cents),
        is_active: true,
        restaurant_id,
    };
    store.insert_product(&product).await.unwrap();
    product.id
}

#[tokio::test]
async fn total_is_exact_fixed_point_sum() {
    let store = InMemoryStore::new();
    let (queue, _rx) = InMemoryQueue::new();
    let service = OrderService::new(store.clone(), queue);

    let restaurant_id = seed_restaurant(&store).await;
    let a = seed_product(&store, restaurant_id, 500).await;
    let b = seed_product(&store, restaurant_id, 350).await;

    let cart = Cart::new(
        restaurant_id,
        vec![CartItem::new(a, qty(2)), CartItem::new(b, qty(1))],
    )
    .unwrap();

    let order = service.place_order(cart, &caller()).await.unwrap();
    // 2 x $5.00 + 1 x $3.50 == $13.50, exactly.
    assert_eq!(order.total_amount, Money::from_cents(1350));
    assert_eq!(order.total_amount.to_decimal().to_string(), "13.50");
}

#[tokio::test]
async fn price_snapshot_survives_later_price_change() {
    let store = InMemoryStore::new();
    let (queue, _rx) = InMemoryQueue::new();
    let service = OrderService::new(store.clone(), queue);
    let catalog = CatalogService::new(store.clone(), MenuCache::new());

    let restaurant_id = seed_restaurant(&store).await;
    let product_id = seed_product(&store, restaurant_id, 1000).await;

    let cart = Cart::new(restaurant_id, vec![CartItem::new(product_id, qty(1))]).unwrap();
    let order = service.place_order(cart, &caller()).await.unwrap();
    assert_eq!(order.lines[0].price, Money::from_cents(1000));

    catalog
        .update_product_price(restaurant_id, product_id, Money::from_cents(2000))
        .await
        .unwrap();

    let reread = service.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(reread.lines[0].price, Money::from_cents(1000));
    assert_eq!(reread.total_amount, Money::from_cents(1000));
}

#[tokio::test]
async fn atomicity_holds_when_a_middle_item_is_missing() {
    let store = InMemoryStore::new();
    let (queue, _rx) = InMemoryQueue::new();
    let service = OrderService::new(store.clone(), queue);

    let restaurant_id = seed_restaurant(&store).await;
    let first = seed_product(&store, restaurant_id, 500).await;
    let missing = ProductId::new();
    let third = seed_product(&store, restaurant_id, 200).await;

    let cart = Cart::new(
        restaurant_id,
        vec![
            CartItem::new(first, qty(1)),
            CartItem::new(missing, qty(1)),
            CartItem::new(third, qty(1)),
        ],
    )
    .unwrap();

    let err = service.place_order(cart, &caller()).await.unwrap_err();
    assert!(matches!(err, PlaceOrderError::ProductNotFound(id) if id == missing));

    // Direct store inspection: nothing survived, not even the valid
    // first line.
    assert_eq!(store.order_count().await, 0);
    assert_eq!(store.line_count().await, 0);
}

#[tokio::test]
async fn commit_then_notify_reaches_the_worker() {
    let store = InMemoryStore::new();
    let (queue, rx) = InMemoryQueue::new();
    let service = OrderService::new(store.clone(), queue);

    let sender = RecordingEmailSender::new();
    let mut worker = Worker::new(rx, sender.clone());

    let restaurant_id = seed_restaurant(&store).await;
    let product_id = seed_product(&store, restaurant_id, 750).await;

    let cart = Cart::new(restaurant_id, vec![CartItem::new(product_id, qty(2))]).unwrap();
    let order = service.place_order(cart, &caller()).await.unwrap();

    worker.run_one().await.unwrap().unwrap();
    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].order_id, order.id);
    assert_eq!(sent[0].amount, Money::from_cents(1500));
    assert_eq!(sent[0].email, "ada@example.com");
}

#[tokio::test]
async fn failed_enqueue_leaves_order_committed() {
    let store = InMemoryStore::new();
    let (queue, _rx) = InMemoryQueue::new();
    queue.set_fail_on_enqueue(true);
    let service = OrderService::new(store.clone(), queue.clone());

    let restaurant_id = seed_restaurant(&store).await;
    let product_id = seed_product(&store, restaurant_id, 500).await;

    let cart = Cart::new(restaurant_id, vec![CartItem::new(product_id, qty(1))]).unwrap();
    let order = service.place_order(cart, &caller()).await.unwrap();

    assert_eq!(queue.enqueued_count(), 0);
    let stored = store.get_order(order.id).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn concurrent_placements_produce_independent_orders() {
    let store = InMemoryStore::new();
    let (queue, _rx) = InMemoryQueue::new();
    let service = Arc::new(OrderService::new(store.clone(), queue));

    let restaurant_id = seed_restaurant(&store).await;
    let a = seed_product(&store, restaurant_id, 500).await;
    let b = seed_product(&store, restaurant_id, 350).await;

    let left = {
        let service = service.clone();
        let cart = Cart::new(restaurant_id, vec![CartItem::new(a, qty(2))]).unwrap();
        tokio::spawn(async move { service.place_order(cart, &caller()).await })
    };
    let right = {
        let service = service.clone();
        let cart = Cart::new(restaurant_id, vec![CartItem::new(b, qty(3))]).unwrap();
        tokio::spawn(async move { service.place_order(cart, &caller()).await })
    };

    let left = left.await.unwrap().unwrap();
    let right = right.await.unwrap().unwrap();

    assert_ne!(left.id, right.id);
    assert_eq!(left.total_amount, Money::from_cents(1000));
    assert_eq!(right.total_amount, Money::from_cents(1050));
    assert_eq!(store.order_count().await, 2);
}
