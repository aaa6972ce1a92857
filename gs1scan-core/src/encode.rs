//! Re-encoding of decoded records into GS1 text
//!
//! Groups are written fixed-length first (GTIN, expiration) then lot and
//! serial, so a variable value is only ever terminated by another variable
//! group or end of input. Every encoding is checked by decoding it again.

use alloc::{string::String, vec::Vec};

use crate::decoder::Gs1Decoder;
use crate::format::constants::{tags, GROUP_OPEN, GTIN_LEN};
use crate::format::DecodedRecord;
use crate::tokenizer::Layout;
use crate::validation::{denormalize_expiration, is_ascii_value};
use crate::{Gs1Error, Result};

/// Collect `(tag, raw value)` pairs for the fields present in `record`
fn groups(record: &DecodedRecord) -> Result<Vec<(&'static str, String)>> {
    let mut groups = Vec::with_capacity(4);

    if let Some(gtin) = &record.gtin {
        if gtin.chars().count() != GTIN_LEN {
            return Err(Gs1Error::InvalidLength);
        }
        groups.push((tags::GTIN, gtin.clone()));
    }
    if let Some(expiration) = &record.expiration {
        groups.push((tags::EXPIRATION, denormalize_expiration(expiration)?));
    }
    if let Some(lot) = &record.lot {
        groups.push((tags::LOT, lot.clone()));
    }
    if let Some(serial) = &record.serial {
        groups.push((tags::SERIAL, serial.clone()));
    }

    for (_, value) in &groups {
        if !is_ascii_value(value.as_bytes()) || value.as_bytes().contains(&GROUP_OPEN) {
            return Err(Gs1Error::InvalidCharacter);
        }
    }

    Ok(groups)
}

impl Gs1Decoder {
    /// Encode `record` in the given layout
    ///
    /// Fails with [`Gs1Error::AmbiguousValue`] when decoding the result would
    /// not give back the same record.
    pub fn encode(&self, record: &DecodedRecord, layout: Layout) -> Result<String> {
        let mut encoded = String::new();

        for (tag, value) in groups(record)? {
            if layout == Layout::Bracketed {
                encoded.push('(');
                encoded.push_str(tag);
                encoded.push(')');
            } else {
                encoded.push_str(tag);
            }
            encoded.push_str(&value);
        }

        if self.decode(&encoded) != *record {
            return Err(Gs1Error::AmbiguousValue);
        }

        Ok(encoded)
    }

    /// Encode `record` as `(tag)value` groups
    pub fn encode_bracketed(&self, record: &DecodedRecord) -> Result<String> {
        self.encode(record, Layout::Bracketed)
    }

    /// Encode `record` with no delimiters
    pub fn encode_positional(&self, record: &DecodedRecord) -> Result<String> {
        self.encode(record, Layout::Positional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> DecodedRecord {
        DecodedRecord {
            gtin: Some("00312345678906".into()),
            lot: Some("LOT42".into()),
            serial: Some("SN99".into()),
            expiration: Some("12/31/2025".into()),
        }
    }

    #[test]
    fn test_encode_bracketed() {
        let decoder = Gs1Decoder::new();
        let encoded = decoder.encode_bracketed(&full_record()).unwrap();
        assert_eq!(encoded, "(01)00312345678906(17)251231(10)LOT42(21)SN99");
        assert_eq!(decoder.decode(&encoded), full_record());
    }

    #[test]
    fn test_encode_positional() {
        let decoder = Gs1Decoder::new();
        let encoded = decoder.encode_positional(&full_record()).unwrap();
        assert_eq!(encoded, "01003123456789061725123110LOT4221SN99");
        assert_eq!(decoder.decode(&encoded), full_record());
    }

    #[test]
    fn test_encode_empty_record() {
        let decoder = Gs1Decoder::new();
        assert_eq!(decoder.encode_bracketed(&DecodedRecord::new()).as_deref(), Ok(""));
        assert_eq!(decoder.encode_positional(&DecodedRecord::new()).as_deref(), Ok(""));
    }

    #[test]
    fn test_encode_rejects_bad_fields() {
        let decoder = Gs1Decoder::new();

        let mut record = full_record();
        record.gtin = Some("0031234567890".into());
        assert_eq!(decoder.encode_bracketed(&record), Err(Gs1Error::InvalidLength));

        let mut record = full_record();
        record.expiration = Some("2025-12-31".into());
        assert_eq!(decoder.encode_positional(&record), Err(Gs1Error::InvalidDate));

        let mut record = full_record();
        record.lot = Some("LOT(1)".into());
        assert_eq!(decoder.encode_bracketed(&record), Err(Gs1Error::InvalidCharacter));

        let mut record = full_record();
        record.serial = Some("SNé".into());
        assert_eq!(decoder.encode_positional(&record), Err(Gs1Error::InvalidCharacter));
    }

    #[test]
    fn test_encode_rejects_values_that_resegment() {
        let decoder = Gs1Decoder::new();

        // "10" inside the lot would end it early in positional text
        let mut record = full_record();
        record.lot = Some("A10B".into());
        assert_eq!(decoder.encode_positional(&record), Err(Gs1Error::AmbiguousValue));
        assert!(decoder.encode_bracketed(&record).is_ok());

        // Whitespace is trimmed when bracketed values are decoded
        let mut record = full_record();
        record.serial = Some(" SN99".into());
        assert_eq!(decoder.encode_bracketed(&record), Err(Gs1Error::AmbiguousValue));

        // An empty bracketed lot swallows the following group
        let mut record = full_record();
        record.lot = Some(String::new());
        assert_eq!(decoder.encode_bracketed(&record), Err(Gs1Error::AmbiguousValue));
        assert!(decoder.encode_positional(&record).is_ok());
    }
}
