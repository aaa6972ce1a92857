//! Value validation and normalization utilities
//!
//! Pure functions with no I/O. Date handling swallows failures into `None`
//! so a bad expiration never fails a decode.

pub mod date;
pub mod parsing;

#[cfg(feature = "alloc")]
pub use date::{denormalize_expiration, normalize_expiration};
pub use date::parse_yymmdd;
pub use parsing::{is_ascii_value, parse_digits};
