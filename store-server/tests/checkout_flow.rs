//! Order placement flows: server-side pricing, precondition failures,
//! snapshot immutability

mod common;

use shared::currency::Currency;
use shared::models::ProductUpdate;
use store_server::AppError;
use store_server::carts::CartService;
use store_server::checkout::CheckoutService;
use store_server::db::repository::{CartRepository, OrderRepository, ProductRepository};

use shared::types::Language;

const EN: Language = Language::En;
const INR: Currency = Currency::Inr;

#[tokio::test]
async fn places_order_with_frozen_variation_prices_and_clears_cart() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let ring = common::seed_product(&db, common::ring_create("ring-001")).await;
    let pendant = common::seed_product(&db, common::plain_create("pendant-1", 5000)).await;
    let ring_id = ring.id.clone().unwrap();
    let pendant_id = pendant.id.clone().unwrap();
    let user = common::seed_user(&db, "buyer@example.com").await;
    let user_id = user.id.clone().unwrap();

    let carts = CartService::new(db.clone());
    carts
        .add_item(&user_id, &ring_id, Some("RNG-18K-8"), 2, EN, INR)
        .await
        .unwrap();
    carts
        .add_item(&user_id, &pendant_id, None, 1, EN, INR)
        .await
        .unwrap();

    let checkout = CheckoutService::new(db.clone());
    let order = checkout
        .place_order(&user_id, "addr-1", Currency::Usd)
        .await
        .unwrap();

    // 2 * 9000 (variation price) + 5000 (base price)
    assert_eq!(order.total_amount_inr, 23000);
    assert_eq!(order.computed_total_inr(), order.total_amount_inr);
    assert_eq!(order.currency_at_purchase, "USD");
    assert_eq!(order.items.len(), 2);
    let ring_item = order
        .items
        .iter()
        .find(|i| i.variation_name.as_deref() == Some("RNG-18K-8"))
        .unwrap();
    assert_eq!(ring_item.unit_price_inr, 9000);
    assert_eq!(ring_item.name, "Heritage Ring");
    assert_eq!(order.shipping_address.city, "Mumbai");

    // The cart was emptied, not deleted
    let cart = CartRepository::new(db.clone())
        .find_by_user(&user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn empty_cart_aborts_placement() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let user = common::seed_user(&db, "buyer@example.com").await;
    let user_id = user.id.clone().unwrap();

    let checkout = CheckoutService::new(db.clone());
    let err = checkout
        .place_order(&user_id, "addr-1", INR)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
    assert_eq!(err.to_string(), "Business rule violation: Your cart is empty");
}

#[tokio::test]
async fn all_dangling_lines_fail_with_no_valid_items_and_leave_cart_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let doomed = common::seed_product(&db, common::plain_create("doomed-1", 2000)).await;
    let doomed_id = doomed.id.clone().unwrap();
    let user = common::seed_user(&db, "buyer@example.com").await;
    let user_id = user.id.clone().unwrap();

    let carts = CartService::new(db.clone());
    carts
        .add_item(&user_id, &doomed_id, None, 1, EN, INR)
        .await
        .unwrap();

    // The product disappears after it was added
    ProductRepository::new(db.clone())
        .delete_by_slug("doomed-1")
        .await
        .unwrap();

    let checkout = CheckoutService::new(db.clone());
    let err = checkout
        .place_order(&user_id, "addr-1", INR)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
    assert_eq!(
        err.to_string(),
        "Business rule violation: No valid items in cart"
    );

    // Placement aborted before the clear step: the cart still holds the line
    let cart = CartRepository::new(db.clone())
        .find_by_user(&user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cart.items.len(), 1);

    // And no zero-item order was created
    let orders = OrderRepository::new(db.clone())
        .find_by_user(&user_id)
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn partially_dangling_carts_skip_only_the_dead_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let keep = common::seed_product(&db, common::plain_create("keep-1", 3000)).await;
    let doomed = common::seed_product(&db, common::plain_create("doomed-1", 2000)).await;
    let keep_id = keep.id.clone().unwrap();
    let doomed_id = doomed.id.clone().unwrap();
    let user = common::seed_user(&db, "buyer@example.com").await;
    let user_id = user.id.clone().unwrap();

    let carts = CartService::new(db.clone());
    carts.add_item(&user_id, &keep_id, None, 2, EN, INR).await.unwrap();
    carts.add_item(&user_id, &doomed_id, None, 1, EN, INR).await.unwrap();

    ProductRepository::new(db.clone())
        .delete_by_slug("doomed-1")
        .await
        .unwrap();

    let order = CheckoutService::new(db.clone())
        .place_order(&user_id, "addr-1", INR)
        .await
        .unwrap();
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.total_amount_inr, 6000);
}

#[tokio::test]
async fn unknown_address_aborts_placement() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let pendant = common::seed_product(&db, common::plain_create("pendant-1", 5000)).await;
    let pendant_id = pendant.id.clone().unwrap();
    let user = common::seed_user(&db, "buyer@example.com").await;
    let user_id = user.id.clone().unwrap();

    let carts = CartService::new(db.clone());
    carts
        .add_item(&user_id, &pendant_id, None, 1, EN, INR)
        .await
        .unwrap();

    let err = CheckoutService::new(db.clone())
        .place_order(&user_id, "addr-404", INR)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");

    // Aborted with no partial effect
    let cart = CartRepository::new(db.clone())
        .find_by_user(&user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn order_snapshot_survives_later_price_changes() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let pendant = common::seed_product(&db, common::plain_create("pendant-1", 5000)).await;
    let pendant_id = pendant.id.clone().unwrap();
    let user = common::seed_user(&db, "buyer@example.com").await;
    let user_id = user.id.clone().unwrap();

    let carts = CartService::new(db.clone());
    carts
        .add_item(&user_id, &pendant_id, None, 2, EN, INR)
        .await
        .unwrap();

    let order = CheckoutService::new(db.clone())
        .place_order(&user_id, "addr-1", INR)
        .await
        .unwrap();
    let order_id = order.id.clone().unwrap();
    assert_eq!(order.total_amount_inr, 10000);

    // Reprice the product after the purchase
    ProductRepository::new(db.clone())
        .update_by_slug(
            "pendant-1",
            ProductUpdate {
                base_price_inr: Some(99000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let reloaded = OrderRepository::new(db.clone())
        .find_by_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.total_amount_inr, 10000);
    assert_eq!(reloaded.items[0].unit_price_inr, 5000);
    assert_eq!(reloaded.computed_total_inr(), reloaded.total_amount_inr);
}

#[tokio::test]
async fn order_history_is_scoped_to_the_identity() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let pendant = common::seed_product(&db, common::plain_create("pendant-1", 5000)).await;
    let pendant_id = pendant.id.clone().unwrap();
    let buyer = common::seed_user(&db, "buyer@example.com").await;
    let other = common::seed_user(&db, "other@example.com").await;
    let buyer_id = buyer.id.clone().unwrap();
    let other_id = other.id.clone().unwrap();

    let carts = CartService::new(db.clone());
    carts
        .add_item(&buyer_id, &pendant_id, None, 1, EN, INR)
        .await
        .unwrap();
    let order = CheckoutService::new(db.clone())
        .place_order(&buyer_id, "addr-1", INR)
        .await
        .unwrap();
    let order_id = order.id.clone().unwrap();

    let orders = OrderRepository::new(db.clone());
    assert!(orders.find_for_user(&order_id, &buyer_id).await.unwrap().is_some());
    assert!(orders.find_for_user(&order_id, &other_id).await.unwrap().is_none());
    assert!(orders.find_by_user(&other_id).await.unwrap().is_empty());
}
