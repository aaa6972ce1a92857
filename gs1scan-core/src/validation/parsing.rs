//! Parsing helpers for AI values

/// Parse an unsigned decimal number made only of ASCII digits
///
/// Returns `None` for empty input, any non-digit byte (signs included) or
/// overflow of `u16`.
pub fn parse_digits(s: &str) -> Option<u16> {
    if s.is_empty() {
        return None;
    }

    let mut result: u16 = 0;

    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return None;
        }

        let digit = u16::from(byte - b'0');
        result = result.checked_mul(10)?.checked_add(digit)?;
    }

    Some(result)
}

/// Check that every byte of a value is 7-bit ASCII
pub fn is_ascii_value(value: &[u8]) -> bool {
    value.iter().all(u8::is_ascii)
}
