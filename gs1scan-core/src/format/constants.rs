//! Format constants for GS1 Application Identifier strings

/// Opening delimiter of a bracketed AI group, also the format detection marker
pub const GROUP_OPEN: u8 = b'(';

/// Closing delimiter of a bracketed AI group
pub const GROUP_CLOSE: u8 = b')';

/// Length of a `YYMMDD` date value
pub const DATE_LEN: usize = 6;

/// Century assumed for every two-digit year
pub const CENTURY: u16 = 2000;

/// Length of a GTIN-14 value
pub const GTIN_LEN: usize = 14;

/// Length of a net weight value
pub const WEIGHT_LEN: usize = 6;

/// Application Identifier tags in the fixed registry
pub mod tags {
    pub const GTIN: &str = "01";
    pub const LOT: &str = "10";
    pub const EXPIRATION: &str = "17";
    pub const SERIAL: &str = "21";
    pub const NET_WEIGHT_KG: &str = "310";
    pub const NET_WEIGHT_LB: &str = "320";
}
