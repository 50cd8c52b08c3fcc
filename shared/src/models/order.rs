//! Order Model
//!
//! Orders are immutable snapshots: item names, unit prices and the
//! shipping address are frozen at placement time and never re-derived
//! from the live catalog.

use serde::{Deserialize, Serialize};

use super::user::Address;

/// Order fulfilment status
///
/// `Processing → Shipped → Delivered`, with `Processing → Cancelled` as
/// the only other transition. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the state machine permits moving to `next`
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }
}

/// Payment status (pay-on-fulfilment model, created as `Pending`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// One purchased line, frozen at placement time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Catalog reference, kept for traceability only
    pub product_id: String,
    /// SKU the purchase was made against; absent for base-product lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_name: Option<String>,
    /// Canonical display name at purchase time
    pub name: String,
    /// Unit price in whole INR rupees at purchase time
    pub unit_price_inr: i64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total_inr(&self) -> i64 {
        self.unit_price_inr * i64::from(self.quantity)
    }
}

/// Shipping address frozen into the order (no back-reference to the
/// address book)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingAddress {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
}

impl From<&Address> for ShippingAddress {
    fn from(address: &Address) -> Self {
        Self {
            full_name: address.full_name.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
            phone: address.phone.clone(),
        }
    }
}

/// Order aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    /// Authoritative total in whole INR rupees, computed server-side at
    /// placement and never recomputed afterwards
    pub total_amount_inr: i64,
    /// Display currency the buyer was browsing in (amounts stay INR)
    pub currency_at_purchase: String,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Order {
    /// Sum of the frozen line totals; equals `total_amount_inr` by
    /// construction
    pub fn computed_total_inr(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total_inr).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_legal() {
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn no_backward_or_terminal_escape_transitions() {
        use OrderStatus::*;
        for from in [Delivered, Cancelled] {
            for to in [Processing, Shipped, Delivered, Cancelled] {
                assert!(!from.can_transition_to(to), "{from:?} -> {to:?}");
            }
        }
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Processing.can_transition_to(Delivered));
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }
}
