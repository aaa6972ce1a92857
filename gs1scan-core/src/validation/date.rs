//! Expiration date conversion between GS1 `YYMMDD` and `MM/DD/YYYY`
//!
//! Two-digit years always land in 2000-2099. Month and day are not checked
//! against the calendar: `251399` becomes `13/99/2025`.

#[cfg(feature = "alloc")]
use alloc::{format, string::String};

use super::parsing::parse_digits;
use crate::format::constants::{CENTURY, DATE_LEN};
#[cfg(feature = "alloc")]
use crate::Gs1Error;

/// Split a `YYMMDD` value into (year, month, day)
///
/// Returns `None` unless the input is exactly six ASCII digits.
pub fn parse_yymmdd(value: &str) -> Option<(u16, u8, u8)> {
    if value.len() != DATE_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let yy = parse_digits(&value[0..2])?;
    let mm = parse_digits(&value[2..4])?;
    let dd = parse_digits(&value[4..6])?;

    Some((CENTURY + yy, mm as u8, dd as u8))
}

/// Convert `YYMMDD` to `MM/DD/YYYY`, or `None` when the value is malformed
#[cfg(feature = "alloc")]
pub fn normalize_expiration(value: &str) -> Option<String> {
    let (year, month, day) = parse_yymmdd(value)?;
    Some(format!("{month:02}/{day:02}/{year}"))
}

/// Convert `MM/DD/YYYY` back to `YYMMDD`
///
/// Only years 2000-2099 can be represented.
#[cfg(feature = "alloc")]
pub fn denormalize_expiration(value: &str) -> crate::Result<String> {
    let mut parts = value.split('/');
    let (Some(mm), Some(dd), Some(yyyy), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Gs1Error::InvalidDate);
    };

    if mm.len() != 2 || dd.len() != 2 || yyyy.len() != 4 {
        return Err(Gs1Error::InvalidDate);
    }

    let month = parse_digits(mm).ok_or(Gs1Error::InvalidDate)?;
    let day = parse_digits(dd).ok_or(Gs1Error::InvalidDate)?;
    let year = parse_digits(yyyy).ok_or(Gs1Error::InvalidDate)?;

    if !(CENTURY..CENTURY + 100).contains(&year) {
        return Err(Gs1Error::InvalidDate);
    }

    Ok(format!("{:02}{month:02}{day:02}", year - CENTURY))
}
