#![no_std]

//! GS1 scan core - Application Identifier registry and barcode decoding
//!
//! This crate provides the fixed AI registry, the tokenizers for bracketed
//! and positional GS1 text, and the decoder that turns a scan into a
//! [`DecodedRecord`]. It performs no I/O.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod decoder;
#[cfg(feature = "alloc")]
pub mod encode;
pub mod error;
pub mod format;
pub mod tokenizer;
pub mod validation;

#[cfg(feature = "alloc")]
pub use decoder::Gs1Decoder;
pub use error::*;
pub use format::*;
pub use tokenizer::{Element, Layout};
pub use validation::parse_yymmdd;
#[cfg(feature = "alloc")]
pub use validation::{denormalize_expiration, normalize_expiration};

/// Core decoding trait for layout-agnostic access
#[cfg(feature = "alloc")]
pub trait BarcodeDecoder {
    /// Decode one scan; never fails
    fn decode(&self, barcode: &str) -> DecodedRecord;
}
