//! GS1 Application Identifier format definitions
//!
//! Registry, constants and the decoded record type. No parsing logic lives
//! here; see the tokenizer module for that.

pub mod constants;
#[cfg(feature = "alloc")]
pub mod record;
pub mod registry;

#[cfg(feature = "alloc")]
pub use record::DecodedRecord;
#[cfg(feature = "alloc")]
pub use registry::build_match_order;
pub use registry::{definition_for, lookup, match_tag, AiDefinition, FieldName, REGISTRY};
