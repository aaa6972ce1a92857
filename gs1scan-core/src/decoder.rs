//! GS1 barcode decoder
//!
//! Owns the tag match order and turns a raw scan into a [`DecodedRecord`].
//! Decoding is total: malformed, partial or empty input yields a record with
//! fewer fields, never an error.

use alloc::vec::Vec;

use crate::format::{build_match_order, AiDefinition, DecodedRecord};
use crate::tokenizer::{BracketedTokens, Element, Layout, PositionalTokens, Tokens};
use crate::BarcodeDecoder;

/// Decoder over the fixed AI registry
///
/// Build once and share; all methods take `&self` and the decoder holds no
/// mutable state.
#[derive(Debug, Clone)]
pub struct Gs1Decoder {
    match_order: Vec<&'static AiDefinition>,
}

impl Default for Gs1Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Gs1Decoder {
    /// Create a decoder, building the longest-first match order
    pub fn new() -> Self {
        Self {
            match_order: build_match_order(),
        }
    }

    /// Tags in the order they are tried at each position
    pub fn match_order(&self) -> &[&'static AiDefinition] {
        &self.match_order
    }

    /// Layout `barcode` would be decoded as
    pub fn layout(&self, barcode: &str) -> Layout {
        Layout::detect(barcode.trim())
    }

    /// Tokenize `barcode` without building a record
    pub fn tokens<'a>(&self, barcode: &'a str) -> Tokens<'a, '_> {
        Tokens::new(barcode.trim(), &self.match_order)
    }

    /// Every recognized AI occurrence, including AIs the record does not carry
    pub fn elements<'a>(&self, barcode: &'a str) -> Vec<Element<'a>> {
        self.tokens(barcode).collect()
    }

    /// Decode a scan, choosing the layout from the presence of `(`
    pub fn decode(&self, barcode: &str) -> DecodedRecord {
        collect_record(self.tokens(barcode))
    }

    /// Decode an optional scan; `None` yields an empty record
    pub fn decode_opt(&self, barcode: Option<&str>) -> DecodedRecord {
        barcode.map(|b| self.decode(b)).unwrap_or_default()
    }

    /// Decode input known to use `(tag)value` groups
    pub fn decode_bracketed(&self, barcode: &str) -> DecodedRecord {
        collect_record(BracketedTokens::new(barcode.trim(), &self.match_order))
    }

    /// Decode input known to have no delimiters
    pub fn decode_positional(&self, barcode: &str) -> DecodedRecord {
        collect_record(PositionalTokens::new(barcode.trim(), &self.match_order))
    }
}

impl BarcodeDecoder for Gs1Decoder {
    fn decode(&self, barcode: &str) -> DecodedRecord {
        Gs1Decoder::decode(self, barcode)
    }
}

/// Fold elements into a record; later occurrences of a field overwrite earlier ones
fn collect_record<'a>(elements: impl Iterator<Item = Element<'a>>) -> DecodedRecord {
    elements.fold(DecodedRecord::new(), |mut record, element| {
        record.store(element.ai.field, element.value);
        record
    })
}
