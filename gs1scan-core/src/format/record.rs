//! Decoded barcode record

use alloc::string::String;

use super::registry::FieldName;
use crate::validation::date::normalize_expiration;

/// Fields extracted from one barcode
///
/// Every field is absent unless its AI was found. A field that was found with
/// an empty value is `Some("")`, which callers can tell apart from `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DecodedRecord {
    /// GTIN-14 (AI 01)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub gtin: Option<String>,
    /// Batch or lot number (AI 10)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub lot: Option<String>,
    /// Serial number (AI 21)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub serial: Option<String>,
    /// Expiration as `MM/DD/YYYY` (AI 17)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub expiration: Option<String>,
}

impl DecodedRecord {
    /// Create a record with every field absent
    pub const fn new() -> Self {
        Self {
            gtin: None,
            lot: None,
            serial: None,
            expiration: None,
        }
    }

    /// Store a raw AI value into the matching field
    ///
    /// Expiration values are normalized; an unparseable date clears the
    /// field. Fields the record does not carry (weights) are ignored.
    pub fn store(&mut self, field: FieldName, value: &str) {
        match field {
            FieldName::Gtin => self.gtin = Some(value.into()),
            FieldName::Lot => self.lot = Some(value.into()),
            FieldName::Serial => self.serial = Some(value.into()),
            FieldName::Expiration => self.expiration = normalize_expiration(value),
            FieldName::Weight => {}
        }
    }

    /// Get the value held for a field
    pub fn get(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::Gtin => self.gtin.as_deref(),
            FieldName::Lot => self.lot.as_deref(),
            FieldName::Serial => self.serial.as_deref(),
            FieldName::Expiration => self.expiration.as_deref(),
            FieldName::Weight => None,
        }
    }

    /// True when no field was found
    pub fn is_empty(&self) -> bool {
        self.gtin.is_none() && self.lot.is_none() && self.serial.is_none() && self.expiration.is_none()
    }
}
