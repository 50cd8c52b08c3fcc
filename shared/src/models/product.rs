//! Product Model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Bilingual catalog text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LocalizedText {
    pub en: String,
    pub hi: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
        }
    }

    /// Text in the requested language, falling back to English
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Hi => {
                if self.hi.is_empty() {
                    &self.en
                } else {
                    &self.hi
                }
            }
        }
    }

    /// The language-agnostic canonical value (English), used wherever a
    /// single source string must be frozen (e.g. order snapshots)
    pub fn canonical(&self) -> &str {
        &self.en
    }
}

/// A named customization axis with its ordered set of allowed values
/// (e.g. Purity ∈ {18K, 22K})
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductOption {
    pub name: String,
    pub values: Vec<String>,
}

/// A concrete SKU: one full combination of axis values with its own
/// price and stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variation {
    pub sku: String,
    pub name: String,
    /// Price in whole INR rupees
    pub price_inr: i64,
    pub stock: i32,
    /// Axis name → selected value, one entry per declared axis
    pub attributes: BTreeMap<String, String>,
    /// Overrides product images when non-empty
    #[serde(default)]
    pub images: Vec<String>,
}

/// Product entity
///
/// `variations` is meaningful only when `options` is non-empty; the
/// variation set need not cover the full cartesian product — absent
/// combinations are simply unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slug: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    /// Price in whole INR rupees (used when no variations exist)
    pub base_price_inr: i64,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    pub collection_name: String,
    /// Product-level stock (only meaningful when `options` is empty)
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Product {
    pub fn has_variations(&self) -> bool {
        !self.options.is_empty()
    }

    /// Look up a variation by SKU (the persisted cart-line key)
    pub fn variation_by_sku(&self, sku: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.sku == sku)
    }
}

/// Create product payload (admin mutation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub slug: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub base_price_inr: i64,
    pub images: Option<Vec<String>>,
    pub category: String,
    pub collection_name: String,
    pub stock: Option<i32>,
    pub is_featured: Option<bool>,
    pub options: Option<Vec<ProductOption>>,
    pub variations: Option<Vec<Variation>>,
}

/// Update product payload (admin mutation); only supplied fields change
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price_inr: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ProductOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<Variation>>,
}
