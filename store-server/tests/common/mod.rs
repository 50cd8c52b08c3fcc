//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{LocalizedText, Product, ProductCreate, Role, User};
use shared::models::product::{ProductOption, Variation};
use shared::models::user::Address;
use shared::util::now_millis;
use store_server::db::DbService;
use store_server::db::repository::{ProductRepository, UserRepository};

pub async fn open_test_db(dir: &Path) -> Surreal<Db> {
    DbService::new(&dir.join("store.db"))
        .await
        .expect("failed to open test database")
        .db
}

fn variation(sku: &str, price: i64, stock: i32, attrs: &[(&str, &str)]) -> Variation {
    Variation {
        sku: sku.to_string(),
        name: sku.to_string(),
        price_inr: price,
        stock,
        attributes: attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        images: Vec::new(),
    }
}

/// Ring with Purity ∈ {18K, 22K}, Size ∈ {8, 10} and a sparse variation
/// set: (18K, 8) at 9000 and (22K, 10) at 11000, but no (18K, 10)
pub fn ring_create(slug: &str) -> ProductCreate {
    ProductCreate {
        slug: slug.to_string(),
        name: LocalizedText::new("Heritage Ring", "विरासत अंगूठी"),
        description: LocalizedText::new("A classic gold ring.", ""),
        base_price_inr: 8000,
        images: Some(vec!["ring.jpg".to_string()]),
        category: "Rings".to_string(),
        collection_name: "Heritage".to_string(),
        stock: Some(0),
        is_featured: Some(false),
        options: Some(vec![
            ProductOption {
                name: "Purity".to_string(),
                values: vec!["18K".to_string(), "22K".to_string()],
            },
            ProductOption {
                name: "Size".to_string(),
                values: vec!["8".to_string(), "10".to_string()],
            },
        ]),
        variations: Some(vec![
            variation("RNG-18K-8", 9000, 3, &[("Purity", "18K"), ("Size", "8")]),
            variation("RNG-22K-10", 11000, 2, &[("Purity", "22K"), ("Size", "10")]),
        ]),
    }
}

/// Product without options: priced and stocked at the product level
pub fn plain_create(slug: &str, price: i64) -> ProductCreate {
    ProductCreate {
        slug: slug.to_string(),
        name: LocalizedText::new(format!("{slug} pendant"), ""),
        description: LocalizedText::new("", ""),
        base_price_inr: price,
        images: Some(vec![format!("{slug}.jpg")]),
        category: "Pendants".to_string(),
        collection_name: "Everyday".to_string(),
        stock: Some(10),
        is_featured: Some(false),
        options: None,
        variations: None,
    }
}

pub async fn seed_product(db: &Surreal<Db>, payload: ProductCreate) -> Product {
    ProductRepository::new(db.clone())
        .create(payload)
        .await
        .expect("failed to seed product")
}

/// User with one saved address (`id = "addr-1"`)
pub async fn seed_user(db: &Surreal<Db>, email: &str) -> User {
    let now = now_millis();
    UserRepository::new(db.clone())
        .create(User {
            id: None,
            name: "Test Buyer".to_string(),
            email: email.to_string(),
            password_hash: None,
            role: Role::User,
            addresses: vec![Address {
                id: "addr-1".to_string(),
                full_name: "Test Buyer".to_string(),
                street: "12 MG Road".to_string(),
                city: "Mumbai".to_string(),
                state: "MH".to_string(),
                zip_code: "400001".to_string(),
                country: "India".to_string(),
                phone: "+91-9000000000".to_string(),
                is_default: true,
            }],
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("failed to seed user")
}
