//! Common storefront types

use serde::{Deserialize, Serialize};

/// Display language for localized catalog text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Parse a language code, falling back to English for unknown values
    pub fn parse_or_default(code: &str) -> Self {
        match code {
            "hi" => Language::Hi,
            _ => Language::En,
        }
    }
}
