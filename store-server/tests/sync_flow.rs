//! Login-time sync/reconciliation flows

mod common;

use shared::client::{LocalCartItem, SyncState};
use store_server::carts::SyncService;
use store_server::db::repository::{CartRepository, WishlistRepository};

fn local(product_id: &str, quantity: u32) -> LocalCartItem {
    LocalCartItem {
        product_id: product_id.to_string(),
        variation_key: None,
        quantity,
    }
}

#[tokio::test]
async fn merge_is_additive_not_replacing() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let a = common::seed_product(&db, common::plain_create("item-a", 1000)).await;
    let b = common::seed_product(&db, common::plain_create("item-b", 2000)).await;
    let a_id = a.id.clone().unwrap();
    let b_id = b.id.clone().unwrap();

    // Persisted cart already holds (A, 3)
    let mut persisted = shared::models::Cart::new("user:u1");
    persisted.add_item(&a_id, None, 3);
    CartRepository::new(db.clone()).upsert(&persisted).await.unwrap();

    // Anonymous cart brings (A, 1) and (B, 2)
    let service = SyncService::new(db.clone());
    let unified = service
        .sync(
            "user:u1",
            SyncState {
                cart: vec![local(&a_id, 1), local(&b_id, 2)],
                wishlist: Vec::new(),
            },
        )
        .await
        .unwrap();

    // Post-sync: (A, 4), (B, 2)
    assert_eq!(unified.cart.len(), 2);
    let qty_a = unified.cart.iter().find(|l| l.product_id == a_id).unwrap().quantity;
    let qty_b = unified.cart.iter().find(|l| l.product_id == b_id).unwrap().quantity;
    assert_eq!(qty_a, 4);
    assert_eq!(qty_b, 2);

    // The unified state equals what was persisted
    let stored = CartRepository::new(db.clone())
        .find_by_user("user:u1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.items.len(), 2);
}

#[tokio::test]
async fn variation_keys_stay_distinct_through_merge() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let ring = common::seed_product(&db, common::ring_create("ring-001")).await;
    let ring_id = ring.id.clone().unwrap();

    let mut persisted = shared::models::Cart::new("user:u1");
    persisted.add_item(&ring_id, Some("RNG-18K-8"), 1);
    CartRepository::new(db.clone()).upsert(&persisted).await.unwrap();

    let service = SyncService::new(db.clone());
    let unified = service
        .sync(
            "user:u1",
            SyncState {
                cart: vec![
                    LocalCartItem {
                        product_id: ring_id.clone(),
                        variation_key: Some("RNG-18K-8".to_string()),
                        quantity: 1,
                    },
                    LocalCartItem {
                        product_id: ring_id.clone(),
                        variation_key: Some("RNG-22K-10".to_string()),
                        quantity: 1,
                    },
                ],
                wishlist: Vec::new(),
            },
        )
        .await
        .unwrap();

    assert_eq!(unified.cart.len(), 2);
    let first = unified
        .cart
        .iter()
        .find(|l| l.variation_key.as_deref() == Some("RNG-18K-8"))
        .unwrap();
    assert_eq!(first.quantity, 2);
}

#[tokio::test]
async fn unknown_products_are_silently_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let a = common::seed_product(&db, common::plain_create("item-a", 1000)).await;
    let a_id = a.id.clone().unwrap();

    let service = SyncService::new(db.clone());
    let unified = service
        .sync(
            "user:u1",
            SyncState {
                cart: vec![local(&a_id, 1), local("product:expired", 5)],
                wishlist: vec![a_id.clone(), "product:expired".to_string()],
            },
        )
        .await
        .unwrap();

    assert_eq!(unified.cart.len(), 1);
    assert_eq!(unified.cart[0].product_id, a_id);
    assert_eq!(unified.wishlist, vec![a_id]);
}

#[tokio::test]
async fn sync_prunes_persisted_dangling_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let a = common::seed_product(&db, common::plain_create("item-a", 1000)).await;
    let a_id = a.id.clone().unwrap();

    // Persisted cart references a product that no longer exists
    let mut persisted = shared::models::Cart::new("user:u1");
    persisted.add_item(&a_id, None, 1);
    persisted.add_item("product:longgone", None, 2);
    CartRepository::new(db.clone()).upsert(&persisted).await.unwrap();

    let service = SyncService::new(db.clone());
    let unified = service
        .sync("user:u1", SyncState::default())
        .await
        .unwrap();

    assert_eq!(unified.cart.len(), 1);
    let stored = CartRepository::new(db.clone())
        .find_by_user("user:u1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].product_id, a_id);
}

#[tokio::test]
async fn wishlist_merge_is_a_set_union() {
    let tmp = tempfile::tempdir().unwrap();
    let db = common::open_test_db(tmp.path()).await;
    let a = common::seed_product(&db, common::plain_create("item-a", 1000)).await;
    let b = common::seed_product(&db, common::plain_create("item-b", 2000)).await;
    let a_id = a.id.clone().unwrap();
    let b_id = b.id.clone().unwrap();

    let mut persisted = shared::models::Wishlist::new("user:u1");
    persisted.insert(&a_id);
    WishlistRepository::new(db.clone()).upsert(&persisted).await.unwrap();

    let service = SyncService::new(db.clone());
    let unified = service
        .sync(
            "user:u1",
            SyncState {
                cart: Vec::new(),
                wishlist: vec![a_id.clone(), b_id.clone()],
            },
        )
        .await
        .unwrap();

    assert_eq!(unified.wishlist.len(), 2);
    assert!(unified.wishlist.contains(&a_id));
    assert!(unified.wishlist.contains(&b_id));
}
