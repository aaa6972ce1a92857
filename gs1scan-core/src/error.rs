//! Error types for GS1 encoding operations
//!
//! Decoding never fails: malformed input degrades to absent fields. These
//! errors only surface when a record is turned back into a GS1 string.

/// Errors that can occur while re-encoding a decoded record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gs1Error {
    /// Fixed-length field value has the wrong length
    InvalidLength,
    /// Expiration is not a `MM/DD/20YY` date
    InvalidDate,
    /// Value contains a character the target format cannot carry
    InvalidCharacter,
    /// Encoded value would be segmented differently when decoded again
    AmbiguousValue,
}

impl core::fmt::Display for Gs1Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Gs1Error::InvalidLength => "Fixed-length field has the wrong length",
            Gs1Error::InvalidDate => "Expiration is not a MM/DD/20YY date",
            Gs1Error::InvalidCharacter => "Value contains an unencodable character",
            Gs1Error::AmbiguousValue => "Value would not survive re-segmentation",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for Gs1Error {}

/// Result type for GS1 encoding operations
pub type Result<T> = core::result::Result<T, Gs1Error>;
