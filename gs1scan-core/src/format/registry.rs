//! Fixed Application Identifier registry
//!
//! The registry is a process-wide immutable table. Tokenization never looks a
//! tag up by key: it walks the longest-first match order so a short tag can
//! never claim a position that belongs to a longer one.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::constants::{tags, DATE_LEN, GTIN_LEN, WEIGHT_LEN};

/// Semantic field an Application Identifier populates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldName {
    Gtin = 0,
    Lot = 1,
    Serial = 2,
    Expiration = 3,
    Weight = 4,
}

impl core::fmt::Display for FieldName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldName::Gtin => write!(f, "GTIN"),
            FieldName::Lot => write!(f, "Lot"),
            FieldName::Serial => write!(f, "Serial"),
            FieldName::Expiration => write!(f, "Expiration"),
            FieldName::Weight => write!(f, "Weight"),
        }
    }
}

/// Immutable registry entry for one Application Identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiDefinition {
    /// Numeric tag, 1 to 4 digits
    pub tag: &'static str,
    /// Field populated by this AI
    pub field: FieldName,
    /// Fixed value length, `None` for variable-length values
    pub length: Option<usize>,
}

impl AiDefinition {
    /// Create a fixed-length definition
    pub const fn fixed(tag: &'static str, field: FieldName, length: usize) -> Self {
        Self {
            tag,
            field,
            length: Some(length),
        }
    }

    /// Create a variable-length definition
    pub const fn variable(tag: &'static str, field: FieldName) -> Self {
        Self {
            tag,
            field,
            length: None,
        }
    }

    /// Whether the value runs until the next recognized tag
    pub const fn is_variable(&self) -> bool {
        self.length.is_none()
    }
}

/// Recognized AIs in registration order
pub static REGISTRY: [AiDefinition; 6] = [
    AiDefinition::fixed(tags::GTIN, FieldName::Gtin, GTIN_LEN),
    AiDefinition::variable(tags::LOT, FieldName::Lot),
    AiDefinition::fixed(tags::EXPIRATION, FieldName::Expiration, DATE_LEN),
    AiDefinition::variable(tags::SERIAL, FieldName::Serial),
    AiDefinition::fixed(tags::NET_WEIGHT_KG, FieldName::Weight, WEIGHT_LEN),
    AiDefinition::fixed(tags::NET_WEIGHT_LB, FieldName::Weight, WEIGHT_LEN),
];

/// Find the definition registered for an exact tag
///
/// Not suitable for tokenization; use the match order there.
pub fn lookup(tag: &str) -> Option<&'static AiDefinition> {
    REGISTRY.iter().find(|ai| ai.tag == tag)
}

/// Find the first definition populating `field`
pub fn definition_for(field: FieldName) -> Option<&'static AiDefinition> {
    REGISTRY.iter().find(|ai| ai.field == field)
}

/// Build the tag match order: longest tag first, ties in registration order
#[cfg(feature = "alloc")]
pub fn build_match_order() -> Vec<&'static AiDefinition> {
    let mut order: Vec<&'static AiDefinition> = REGISTRY.iter().collect();
    // sort_by is stable
    order.sort_by(|a, b| b.tag.len().cmp(&a.tag.len()));
    order
}

/// Return the registered tag that `input` starts with, trying `order` in sequence
pub fn match_tag<'o>(
    input: &[u8],
    order: &'o [&'static AiDefinition],
) -> Option<&'o &'static AiDefinition> {
    order.iter().find(|ai| input.starts_with(ai.tag.as_bytes()))
}
