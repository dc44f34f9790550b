//! Numeric argument tokens.
//!
//! A token must be a number in its entirety. Unsigned fields also take a
//! negative value and signed fields a value up to `u32::MAX`; either is
//! reinterpreted bit for bit.

fn as_text(token: &[u8]) -> Option<&str> {
    std::str::from_utf8(token).ok()
}

pub fn parse_unsigned(token: &[u8]) -> Option<u32> {
    let text = as_text(token)?;
    text.parse::<u32>()
        .ok()
        .or_else(|| text.parse::<i32>().ok().map(|v| v as u32))
}

pub fn parse_signed(token: &[u8]) -> Option<i32> {
    let text = as_text(token)?;
    text.parse::<i32>()
        .ok()
        .or_else(|| text.parse::<u32>().ok().map(|v| v as i32))
}

/// Octal, as written for font checksums.
pub fn parse_octal(token: &[u8]) -> Option<u32> {
    let text = as_text(token)?;
    u32::from_str_radix(text, 8).ok()
}
