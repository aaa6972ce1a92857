//! Process-wide decoder and batch decoding
//!
//! The decoder is built once, on first use, and only read afterwards.

use std::sync::LazyLock;

use gs1scan_core::{BarcodeDecoder, DecodedRecord, Element, Gs1Decoder, Layout};
use log::{debug, trace};
use rayon::prelude::*;

static DECODER: LazyLock<Gs1Decoder> = LazyLock::new(|| {
    let decoder = Gs1Decoder::new();
    debug!(
        "GS1 match order: {:?}",
        decoder.match_order().iter().map(|ai| ai.tag).collect::<Vec<_>>()
    );
    decoder
});

/// Shared decoder instance
pub fn decoder() -> &'static Gs1Decoder {
    &DECODER
}

/// Decode one scan with the shared decoder
pub fn decode(barcode: &str) -> DecodedRecord {
    let record = DECODER.decode(barcode);
    trace!(
        "Decoded {} scan {barcode:?}: {record:?}",
        DECODER.layout(barcode)
    );
    record
}

/// Every recognized `(AI, value)` pair in a scan
pub fn elements(barcode: &str) -> Vec<Element<'_>> {
    DECODER.elements(barcode)
}

/// Layout a scan will be decoded as
pub fn layout(barcode: &str) -> Layout {
    DECODER.layout(barcode)
}

/// Decode a batch of scans in parallel, preserving input order
pub fn decode_batch<S: AsRef<str> + Sync>(barcodes: &[S]) -> Vec<DecodedRecord> {
    decode_batch_with(decoder(), barcodes)
}

/// Decode a batch of scans with any decoder, preserving input order
pub fn decode_batch_with<D, S>(decoder: &D, barcodes: &[S]) -> Vec<DecodedRecord>
where
    D: BarcodeDecoder + Sync,
    S: AsRef<str> + Sync,
{
    let records: Vec<DecodedRecord> = barcodes
        .par_iter()
        .map(|barcode| decoder.decode(barcode.as_ref()))
        .collect();

    let incomplete = records.iter().filter(|r| r.gtin.is_none()).count();
    debug!(
        "Decoded batch of {} scans ({incomplete} without GTIN)",
        records.len()
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_decoder_is_built_once() {
        assert!(std::ptr::eq(decoder(), decoder()));
        assert_eq!(decoder().match_order()[0].tag, "310");
    }

    #[test]
    fn test_decode() {
        let record = decode("(01)00312345678906(17)251231(10)LOT42(21)SN99");
        assert_eq!(record.gtin.as_deref(), Some("00312345678906"));
        assert_eq!(record.expiration.as_deref(), Some("12/31/2025"));
        assert_eq!(record.lot.as_deref(), Some("LOT42"));
        assert_eq!(record.serial.as_deref(), Some("SN99"));
        assert_eq!(layout("0100312345678906"), Layout::Positional);
    }

    #[test]
    fn test_decode_batch_preserves_order() {
        let scans = [
            "0100312345678906211234",
            "",
            "(01)00312345678906(10)LOT42",
            "garbage",
        ];
        let records = decode_batch(&scans);

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].serial.as_deref(), Some("1234"));
        assert!(records[1].is_empty());
        assert_eq!(records[2].lot.as_deref(), Some("LOT42"));
        assert!(records[3].is_empty());
    }

    #[test]
    fn test_decode_batch_with_custom_decoder() {
        struct Fixed;
        impl BarcodeDecoder for Fixed {
            fn decode(&self, barcode: &str) -> DecodedRecord {
                DecodedRecord {
                    lot: Some(barcode.to_uppercase()),
                    ..DecodedRecord::default()
                }
            }
        }

        let records = decode_batch_with(&Fixed, &[String::from("a"), String::from("b")]);
        assert_eq!(records[0].lot.as_deref(), Some("A"));
        assert_eq!(records[1].lot.as_deref(), Some("B"));
    }

    #[test]
    fn test_random_input_never_panics() {
        use rand::{distributions::Uniform, Rng};

        let mut rng = rand::thread_rng();
        let alphabet: Vec<char> = "0123456789()ABC xé".chars().collect();
        let pick = Uniform::from(0..alphabet.len());

        for _ in 0..2_000 {
            let len = rng.gen_range(0..40);
            let scan: String = (0..len).map(|_| alphabet[rng.sample(pick)]).collect();
            let record = decode(&scan);
            if let Some(expiration) = record.expiration {
                assert_eq!(expiration.len(), 10);
            }
        }
    }
}
