//! GS1 scan - barcode decoding, registries and DSCSA export
//!
//! This library turns GS1 barcode scans into structured product records and
//! provides the pieces around them: partner and product registries, a client
//! for the scan backend API and DSCSA transaction CSV export.
//!
//! ## Architecture
//!
//! The workspace separates pure decoding from I/O:
//!
//! - **gs1scan-core**: AI registry, tokenizers and decoder (`no_std`, no I/O)
//! - **gs1scan**: shared decoder, stores, HTTP client and CSV export
//!
//! ## Quick Start
//!
//! ```rust
//! use gs1scan::decode;
//!
//! let record = decode("(01)00312345678906(17)251231(10)LOT42(21)SN99");
//! assert_eq!(record.gtin.as_deref(), Some("00312345678906"));
//! assert_eq!(record.expiration.as_deref(), Some("12/31/2025"));
//! assert_eq!(record.lot.as_deref(), Some("LOT42"));
//! assert_eq!(record.serial.as_deref(), Some("SN99"));
//! ```
//!
//! ## Features
//!
//! - **async**: record stores, partner directory and product catalog
//! - **http**: backend API client built on reqwest
//! - **serde**: JSON (de)serialization of records, partners and products
//! - **cli**: clap for the `scan_cli` example

// Re-export core abstractions and format definitions
pub use gs1scan_core::{
    // Decoding
    BarcodeDecoder, DecodedRecord, Element, Gs1Decoder, Layout,
    // Format definitions
    AiDefinition, FieldName, REGISTRY,
    // Date handling
    denormalize_expiration, normalize_expiration, parse_yymmdd,
    // Encoding errors
    Gs1Error,
};

// Implementation modules
pub mod api_client;
pub mod config;
pub mod csv_export;
pub mod decoder;
pub mod error;
pub mod partners;
pub mod products;
#[cfg(feature = "async")]
pub mod store;

// Public exports
pub use config::ApiConfig;
pub use csv_export::{generate_dscsa_csv, generate_filename, write_csv, ScannedItem, TransactionMetadata};
pub use decoder::{decode, decode_batch, decoder};
pub use error::{Error, Result};
pub use partners::{Partner, PartnerRole};
pub use products::Product;

// Registry features
#[cfg(feature = "async")]
pub use partners::PartnerDirectory;
#[cfg(feature = "async")]
pub use products::ProductCatalog;
#[cfg(feature = "async")]
pub use store::{Keyed, MemoryStore, RecordStore};

// HTTP backend features
#[cfg(feature = "http")]
pub use api_client::ApiClient;
