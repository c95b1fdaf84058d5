//! Numeric casters: `number`, `integer`, `bigint`, `emojint`.
//!
//! `number` and `integer` are permissive: they accept the longest numeric
//! prefix of the phrase, so `"12abc"` is `12`. `bigint` is strict and is the
//! one scalar caster that can fail with an error.

use num_bigint::BigInt;

use castkit_core::CastContext;

use crate::error::{CastError, CastResult};
use crate::value::Value;

/// Parses the leading integer of `input`.
///
/// Leading whitespace and one sign are skipped. With `radix` 16 an optional
/// `0x` prefix is accepted; with radix 10 a `0x` prefix switches to 16.
/// Returns `None` when no digit is found or the value overflows `i64`.
pub(crate) fn parse_int_prefix(input: &str, radix: u32) -> Option<i64> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, s) = match s.get(..2) {
        Some("0x" | "0X") if radix == 10 || radix == 16 => (16, &s[2..]),
        _ => (radix, s),
    };

    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(s.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for c in s[..end].chars() {
        let digit = i64::from(c.to_digit(radix)?);
        value = value.checked_mul(i64::from(radix))?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }
    Some(value)
}

/// Parses the leading floating point number of `input`.
pub(crate) fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;
    let mut negative = false;
    if let Some(&sign @ (b'-' | b'+')) = bytes.first() {
        negative = sign == b'-';
        pos = 1;
    }

    if s[pos..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_len = digits(pos);
    let mut literal = String::with_capacity(s.len() + 1);
    if negative {
        literal.push('-');
    }
    literal.push_str(&s[pos..pos + int_len]);
    pos += int_len;

    let mut frac_len = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_len = digits(pos + 1);
        if frac_len > 0 {
            if int_len == 0 {
                literal.push('0');
            }
            literal.push_str(&s[pos..pos + 1 + frac_len]);
        }
        pos += 1 + frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    if let Some(b'e' | b'E') = bytes.get(pos) {
        let mut exp_pos = pos + 1;
        if let Some(b'-' | b'+') = bytes.get(exp_pos) {
            exp_pos += 1;
        }
        let exp_len = digits(exp_pos);
        if exp_len > 0 {
            literal.push_str(&s[pos..exp_pos + exp_len]);
        }
    }

    literal.parse().ok()
}

/// Whether `input` as a whole reads as a number literal.
///
/// Accepts surrounding whitespace, decimal literals with fraction and
/// exponent, `Infinity`, and unsigned `0x`/`0o`/`0b` integers. Whitespace-only
/// input counts as the literal zero.
pub(crate) fn is_number_literal(input: &str) -> bool {
    let s = input.trim();
    if s.is_empty() {
        return true;
    }
    if let Some((radix, digits)) = split_radix_prefix(s) {
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    if unsigned == "Infinity" {
        return true;
    }

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int.is_empty() && frac.is_empty() || !all_digits(int) || !all_digits(frac) {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['-', '+']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

fn split_radix_prefix(s: &str) -> Option<(u32, &str)> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

/// Parses an integer literal into a [`BigInt`].
pub(crate) fn parse_bigint(input: &str) -> Result<BigInt, CastError> {
    let invalid = |reason: &str| CastError::InvalidBigInt {
        phrase: input.to_owned(),
        reason: reason.to_owned(),
    };

    let s = input.trim();
    if s.is_empty() {
        return Ok(BigInt::default());
    }
    if let Some((radix, digits)) = split_radix_prefix(s) {
        return BigInt::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| invalid("invalid digits for radix"));
    }

    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("not an integer literal"));
    }
    s.parse::<BigInt>().map_err(|e| invalid(&e.to_string()))
}

const TEN_GLYPH: char = '\u{1F51F}';
const KEYCAP: char = '\u{20E3}';
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Replaces keycap digit glyphs with their digits and the "ten" glyph with
/// `10`. Everything else is kept as is.
pub(crate) fn decode_emoji_digits(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut chars = phrase.chars().peekable();
    while let Some(c) = chars.next() {
        if c == TEN_GLYPH {
            out.push_str("10");
            continue;
        }
        if c.is_ascii_digit() {
            let mut lookahead = chars.clone();
            if lookahead.peek() == Some(&VARIATION_SELECTOR) {
                lookahead.next();
            }
            if lookahead.next() == Some(KEYCAP) {
                chars = lookahead;
            }
        }
        out.push(c);
    }
    out
}

pub(crate) fn number(_ctx: &CastContext, phrase: &str) -> CastResult {
    if phrase.is_empty() {
        return Ok(None);
    }
    Ok(parse_float_prefix(phrase).map(Value::Number))
}

pub(crate) fn integer(_ctx: &CastContext, phrase: &str) -> CastResult {
    if phrase.is_empty() {
        return Ok(None);
    }
    Ok(parse_int_prefix(phrase, 10).map(Value::Integer))
}

pub(crate) fn bigint(_ctx: &CastContext, phrase: &str) -> CastResult {
    if phrase.is_empty() || !is_number_literal(phrase) {
        return Ok(None);
    }
    parse_bigint(phrase).map(|n| Some(Value::BigInt(n)))
}

pub(crate) fn emojint(_ctx: &CastContext, phrase: &str) -> CastResult {
    if phrase.is_empty() {
        return Ok(None);
    }
    let decoded = decode_emoji_digits(phrase);
    Ok(parse_int_prefix(&decoded, 10).map(Value::Integer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_prefix() {
        assert_eq!(parse_int_prefix("12abc", 10), Some(12));
        assert_eq!(parse_int_prefix("  -7", 10), Some(-7));
        assert_eq!(parse_int_prefix("0x1F", 10), Some(31));
        assert_eq!(parse_int_prefix("3.9", 10), Some(3));
        assert_eq!(parse_int_prefix("abc", 10), None);
        assert_eq!(parse_int_prefix("-", 10), None);
        assert_eq!(parse_int_prefix("99999999999999999999", 10), None);
        assert_eq!(parse_int_prefix("-9223372036854775808", 10), Some(i64::MIN));
    }

    #[test]
    fn test_float_prefix() {
        assert_eq!(parse_float_prefix("3.14"), Some(3.14));
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("-2e3x"), Some(-2000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("e5"), None);
    }

    #[test]
    fn test_number_literal() {
        assert!(is_number_literal(" 42 "));
        assert!(is_number_literal("1.5"));
        assert!(is_number_literal("-1e10"));
        assert!(is_number_literal("0b101"));
        assert!(is_number_literal(".5"));
        assert!(!is_number_literal("12abc"));
        assert!(!is_number_literal("-0x10"));
        assert!(!is_number_literal("."));
        assert!(!is_number_literal("1e"));
    }

    #[test]
    fn test_bigint_literals() {
        assert_eq!(
            parse_bigint("123456789012345678901234567890").unwrap().to_string(),
            "123456789012345678901234567890"
        );
        assert_eq!(parse_bigint("0xff").unwrap(), BigInt::from(255));
        assert_eq!(parse_bigint(" -5 ").unwrap(), BigInt::from(-5));
        assert!(matches!(parse_bigint("1.5"), Err(CastError::InvalidBigInt { .. })));
        assert!(matches!(parse_bigint("1e3"), Err(CastError::InvalidBigInt { .. })));
    }

    #[test]
    fn test_decode_emoji_digits() {
        assert_eq!(decode_emoji_digits("4\u{20E3}2\u{20E3}"), "42");
        assert_eq!(decode_emoji_digits("4\u{FE0F}\u{20E3}2\u{FE0F}\u{20E3}"), "42");
        assert_eq!(decode_emoji_digits("\u{1F51F}"), "10");
        assert_eq!(decode_emoji_digits("7x"), "7x");
    }
}
