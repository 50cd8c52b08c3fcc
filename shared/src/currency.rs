//! Display-currency conversion
//!
//! All stored amounts are whole INR rupees (the currency of record).
//! Conversion to a display currency happens only at the view boundary,
//! using static lookup rates. Converted values are never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supported display currencies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Parse a currency code, falling back to INR for unknown values
    pub fn parse_or_default(code: &str) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            _ => Currency::Inr,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Static exchange rate from 1 INR into this currency
    fn rate_from_inr(self) -> Decimal {
        match self {
            Currency::Inr => Decimal::ONE,
            Currency::Usd => Decimal::new(12, 3),  // 0.012
            Currency::Eur => Decimal::new(11, 3),  // 0.011
            Currency::Gbp => Decimal::new(94, 4),  // 0.0094
        }
    }
}

/// Convert an INR amount into the target display currency, rounded to 2 dp
pub fn convert_inr(amount_inr: i64, target: Currency) -> Decimal {
    (Decimal::from(amount_inr) * target.rate_from_inr()).round_dp(2)
}

/// Format an INR amount as a display string in the target currency
///
/// INR uses Indian digit grouping (12,34,567); other currencies group in
/// thousands.
pub fn format_inr(amount_inr: i64, target: Currency) -> String {
    let amount = convert_inr(amount_inr, target);
    let negative = amount.is_sign_negative();
    let abs = amount.abs();

    let text = format!("{:.2}", abs);
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = match target {
        Currency::Inr => group_indian(whole),
        _ => group_thousands(whole),
    };

    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{}", sign, target.symbol(), grouped, frac)
}

/// Indian grouping: last three digits, then pairs (e.g. 12,34,567)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<String> = Vec::new();
    let mut i = head.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(head[start..i].to_string());
        i = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Western grouping: groups of three (e.g. 1,234,567)
fn group_thousands(digits: &str) -> String {
    let mut groups: Vec<String> = Vec::new();
    let mut i = digits.len();
    while i > 0 {
        let start = i.saturating_sub(3);
        groups.push(digits[start..i].to_string());
        i = start;
    }
    groups.reverse();
    groups.join(",")
}
