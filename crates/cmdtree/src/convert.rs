//! Textual value conversion.
//!
//! Pure, allocation-free conversions from a single token to the primitive
//! types a [`Slot`](crate::Slot) can bind. Integers go through a 64-bit
//! intermediate honoring the usual literal base prefixes (`0x` hex,
//! leading `0` octal, decimal otherwise) and are then range-checked
//! against the destination width. Every function consumes the whole token:
//! trailing junk is a conversion failure, never a partial parse.

use std::str::FromStr;

/// Parse a boolean token.
///
/// `"1"` and case-insensitive `"true"` are true; `"0"` and case-insensitive
/// `"false"` are false. Everything else fails.
pub fn parse_bool(text: &str) -> Option<bool> {
    if text == "1" || text.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if text == "0" || text.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    None
}

/// Sign handling shared by the signed and unsigned 64-bit parsers.
fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    }
}

/// Detect the numeric base from the literal prefix.
///
/// `0x`/`0X` is hexadecimal, a leading `0` followed by more digits is
/// octal, a bare `0` is just zero, anything else is decimal.
fn split_radix(text: &str) -> (u32, &str) {
    if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return (16, rest);
    }
    if text.len() > 1 && text.starts_with('0') {
        return (8, &text[1..]);
    }
    (10, text)
}

/// Parse a signed 64-bit value with base-prefix detection.
///
/// Digits accumulate away from zero in the sign's direction so that
/// `i64::MIN` round-trips without overflow.
pub fn parse_i64(text: &str) -> Option<i64> {
    let (negative, rest) = split_sign(text);
    let (radix, digits) = split_radix(rest);
    if digits.is_empty() {
        return None;
    }

    let mut acc: i64 = 0;
    for ch in digits.chars() {
        let digit = ch.to_digit(radix)? as i64;
        acc = acc.checked_mul(radix as i64)?;
        acc = if negative {
            acc.checked_sub(digit)?
        } else {
            acc.checked_add(digit)?
        };
    }
    Some(acc)
}

/// Parse an unsigned 64-bit value with base-prefix detection.
///
/// A leading `-` is a conversion failure, not a wraparound.
pub fn parse_u64(text: &str) -> Option<u64> {
    let (negative, rest) = split_sign(text);
    if negative {
        return None;
    }
    let (radix, digits) = split_radix(rest);
    if digits.is_empty() {
        return None;
    }

    let mut acc: u64 = 0;
    for ch in digits.chars() {
        let digit = ch.to_digit(radix)? as u64;
        acc = acc.checked_mul(radix as u64)?;
        acc = acc.checked_add(digit)?;
    }
    Some(acc)
}

/// Parse a signed integer of any width through the 64-bit intermediate.
pub fn parse_signed<T: TryFrom<i64>>(text: &str) -> Option<T> {
    T::try_from(parse_i64(text)?).ok()
}

/// Parse an unsigned integer of any width through the 64-bit intermediate.
pub fn parse_unsigned<T: TryFrom<u64>>(text: &str) -> Option<T> {
    T::try_from(parse_u64(text)?).ok()
}

/// Parse a floating point value; locale-independent, whole token only.
pub fn parse_float<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_table() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("TrUe"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("False"), Some(false));

        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("tr"), None);
        assert_eq!(parse_bool("truely"), None);
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn decimal_integers() {
        assert_eq!(parse_i64("0"), Some(0));
        assert_eq!(parse_i64("42"), Some(42));
        assert_eq!(parse_i64("+42"), Some(42));
        assert_eq!(parse_i64("-42"), Some(-42));
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("+42"), Some(42));
    }

    #[test]
    fn base_prefixes() {
        assert_eq!(parse_i64("0x10"), Some(16));
        assert_eq!(parse_i64("0XfF"), Some(255));
        assert_eq!(parse_i64("-0x10"), Some(-16));
        assert_eq!(parse_i64("010"), Some(8));
        assert_eq!(parse_i64("-010"), Some(-8));
        assert_eq!(parse_u64("0x10"), Some(16));
        assert_eq!(parse_u64("010"), Some(8));
    }

    #[test]
    fn sixty_four_bit_boundaries() {
        assert_eq!(parse_i64("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_i64("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_i64("9223372036854775808"), None);
        assert_eq!(parse_i64("-9223372036854775809"), None);

        assert_eq!(parse_u64("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_u64("18446744073709551616"), None);
        assert_eq!(parse_u64("0xffffffffffffffff"), Some(u64::MAX));
    }

    #[test]
    fn narrow_widths_are_range_checked() {
        assert_eq!(parse_signed::<i8>("-128"), Some(i8::MIN));
        assert_eq!(parse_signed::<i8>("127"), Some(i8::MAX));
        assert_eq!(parse_signed::<i8>("128"), None);
        assert_eq!(parse_signed::<i8>("-129"), None);

        assert_eq!(parse_unsigned::<u8>("255"), Some(u8::MAX));
        assert_eq!(parse_unsigned::<u8>("256"), None);
        assert_eq!(parse_signed::<i16>("0x7fff"), Some(i16::MAX));
        assert_eq!(parse_signed::<i16>("0x8000"), None);
        assert_eq!(parse_unsigned::<u32>("4294967295"), Some(u32::MAX));
        assert_eq!(parse_unsigned::<u32>("4294967296"), None);
    }

    #[test]
    fn malformed_integers() {
        assert_eq!(parse_i64(""), None);
        assert_eq!(parse_i64("-"), None);
        assert_eq!(parse_i64("+"), None);
        assert_eq!(parse_i64("0x"), None);
        assert_eq!(parse_i64("12ab"), None);
        assert_eq!(parse_i64("1.5"), None);
        assert_eq!(parse_i64("098"), None);
        assert_eq!(parse_u64("-1"), None);
        assert_eq!(parse_u64("12 "), None);
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float::<f64>("1.5"), Some(1.5));
        assert_eq!(parse_float::<f64>("-0.25"), Some(-0.25));
        assert_eq!(parse_float::<f64>("1e3"), Some(1000.0));
        assert_eq!(parse_float::<f32>("0.5"), Some(0.5f32));

        assert_eq!(parse_float::<f64>(""), None);
        assert_eq!(parse_float::<f64>("abc"), None);
        assert_eq!(parse_float::<f64>("1.5x"), None);
    }
}
