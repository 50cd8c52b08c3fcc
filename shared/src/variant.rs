//! Variant Resolver
//!
//! Maps an attribute selection onto a product's variation list,
//! deterministically. The resolver is pure: same product + same
//! selection always yields the same result, independent of call order.
//!
//! A selection normally carries one entry per declared axis (the UI
//! seeds every axis with its first value on load); the match predicate
//! only requires that every pair *present* in the selection agrees with
//! the variation. Partial-selection fallback is deliberately undefined.

use std::collections::BTreeMap;

use crate::models::product::{Product, ProductOption, Variation};

/// Axis name → selected value
pub type Selection = BTreeMap<String, String>;

/// Outcome of resolving a selection against a product
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantResolution<'a> {
    /// The product declares no options; price and stock come from the
    /// product itself
    NoVariants,
    /// Exactly this variation matches the selection
    Match(&'a Variation),
    /// The product has options but no variation matches — the
    /// combination is unavailable and must not be purchasable
    NoMatch,
}

impl<'a> VariantResolution<'a> {
    pub fn variation(self) -> Option<&'a Variation> {
        match self {
            VariantResolution::Match(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the selection can be priced at all
    pub fn is_available(self) -> bool {
        !matches!(self, VariantResolution::NoMatch)
    }
}

/// Validate that a variation list fits its option schema: every
/// variation must assign exactly one value per declared axis, and that
/// value must belong to the axis's declared set. Run at admin write
/// time so no malformed attribute map ever reaches the resolver.
pub fn validate_variations(
    options: &[ProductOption],
    variations: &[Variation],
) -> Result<(), String> {
    if options.is_empty() {
        if variations.is_empty() {
            return Ok(());
        }
        return Err("variations require a non-empty option schema".to_string());
    }
    for variation in variations {
        if variation.attributes.len() != options.len() {
            return Err(format!(
                "variation {} must assign exactly one value per axis",
                variation.sku
            ));
        }
        for option in options {
            match variation.attributes.get(&option.name) {
                Some(value) if option.values.contains(value) => {}
                Some(value) => {
                    return Err(format!(
                        "variation {}: value {value:?} is not declared for axis {:?}",
                        variation.sku, option.name
                    ));
                }
                None => {
                    return Err(format!(
                        "variation {} is missing a value for axis {:?}",
                        variation.sku, option.name
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Seed a selection with each axis's first declared value
pub fn default_selection(options: &[ProductOption]) -> Selection {
    options
        .iter()
        .filter_map(|o| {
            o.values
                .first()
                .map(|v| (o.name.clone(), v.clone()))
        })
        .collect()
}

impl Product {
    /// Resolve a selection to a variation
    ///
    /// A candidate matches iff every `(axis, value)` pair present in the
    /// selection equals the variation's attribute for that axis. The
    /// first match in declaration order wins, which keeps the result
    /// stable across calls.
    pub fn resolve(&self, selection: &Selection) -> VariantResolution<'_> {
        if self.options.is_empty() {
            return VariantResolution::NoVariants;
        }
        self.variations
            .iter()
            .find(|variation| {
                selection
                    .iter()
                    .all(|(axis, value)| variation.attributes.get(axis) == Some(value))
            })
            .map_or(VariantResolution::NoMatch, VariantResolution::Match)
    }

    /// Effective unit price for a resolution; `None` means the
    /// combination is unavailable and has no meaningful price
    pub fn effective_price_inr(&self, resolution: VariantResolution<'_>) -> Option<i64> {
        match resolution {
            VariantResolution::NoVariants => Some(self.base_price_inr),
            VariantResolution::Match(v) => Some(v.price_inr),
            VariantResolution::NoMatch => None,
        }
    }

    /// Effective stock for a resolution; an unmatched combination is
    /// out of stock by definition
    pub fn effective_stock(&self, resolution: VariantResolution<'_>) -> i32 {
        match resolution {
            VariantResolution::NoVariants => self.stock,
            VariantResolution::Match(v) => v.stock,
            VariantResolution::NoMatch => 0,
        }
    }

    /// Images for a resolution: the matched variation's when it carries
    /// any, else the product's
    pub fn effective_images<'a>(&'a self, resolution: VariantResolution<'a>) -> &'a [String] {
        match resolution {
            VariantResolution::Match(v) if !v.images.is_empty() => &v.images,
            _ => &self.images,
        }
    }
}
