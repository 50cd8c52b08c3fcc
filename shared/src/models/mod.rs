//! Storefront domain models

pub mod cart;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;

// Re-exports
pub use cart::{Cart, CartLineItem};
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus, ShippingAddress};
pub use product::{LocalizedText, Product, ProductCreate, ProductOption, ProductUpdate, Variation};
pub use user::{Address, Role, User, UserPublic};
pub use wishlist::Wishlist;
